//! Project manifest (quark.toml)
//!
//! Defines the project configuration format for Quark projects.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the project manifest
pub const MANIFEST_FILE: &str = "quark.toml";

/// Project manifest loaded from `quark.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectInfo,

    /// Source configuration
    #[serde(default)]
    pub source: SourceConfig,
}

impl Manifest {
    /// Load a manifest from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save a manifest to a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let content = toml::to_string_pretty(self).map_err(|e| ManifestError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;

        std::fs::write(path, content).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Create a new manifest with default values
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project: ProjectInfo {
                name: name.into(),
                version: "0.1.0".to_string(),
                description: None,
            },
            source: SourceConfig::default(),
        }
    }

    /// Find a manifest by searching upward from `start`
    ///
    /// # Errors
    ///
    /// Returns an error if no manifest is found.
    pub fn find(start: &Path) -> Result<PathBuf, ManifestError> {
        let mut current = start.to_path_buf();

        loop {
            let manifest_path = current.join(MANIFEST_FILE);
            if manifest_path.exists() {
                return Ok(manifest_path);
            }

            if !current.pop() {
                return Err(ManifestError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }
}

/// Project metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name
    pub name: String,
    /// Project version
    pub version: String,
    /// Project description
    pub description: Option<String>,
}

/// Source file configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding specification files (relative to the manifest)
    #[serde(default = "default_src_dir")]
    pub dir: PathBuf,
    /// File extension for specification files
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: default_src_dir(),
            extension: default_extension(),
        }
    }
}

fn default_src_dir() -> PathBuf {
    PathBuf::from("specs")
}

/// Default extension of specification files
pub(crate) fn default_extension() -> String {
    "quark".to_string()
}

/// Errors that can occur when working with manifests
#[derive(Debug, Error)]
pub enum ManifestError {
    /// IO error reading/writing manifest
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Parse error in TOML
    #[error("Parse error in {}: {source}", path.display())]
    Parse {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },
    /// Serialization error
    #[error("Serialization error for {}: {source}", path.display())]
    Serialize {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying serialization error
        source: toml::ser::Error,
    },
    /// No manifest found
    #[error("No quark.toml found searching from {}", searched_from.display())]
    NotFound {
        /// Directory searched from
        searched_from: PathBuf,
    },
}
