//! Project loader
//!
//! Loads single specification files, or every specification under a
//! manifest's source directory. Each file is parsed on its own, so one
//! broken file is reported without hiding the others.

use super::manifest::{default_extension, Manifest, ManifestError, MANIFEST_FILE};
use crate::ast::Spec;
use crate::parser::{self, ParseError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// A loaded set of specification files
#[derive(Debug)]
pub struct Project {
    /// The project manifest (synthesized for a lone file)
    pub manifest: Manifest,
    /// Root directory of the project
    pub root: PathBuf,
    /// Files that parsed
    pub sources: Vec<SourceFile>,
    /// Files that could not be read or parsed
    pub failures: Vec<LoadError>,
}

impl Project {
    /// Get the project name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.manifest.project.name
    }

    /// Check if any file failed to load
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Get all per-file failures
    #[must_use]
    pub fn errors(&self) -> &[LoadError] {
        &self.failures
    }

    /// Number of files examined
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.sources.len() + self.failures.len()
    }
}

/// A loaded source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File path
    pub path: PathBuf,
    /// File contents
    pub source: String,
    /// Parsed specification
    pub spec: Spec,
}

/// Project loader
pub struct Loader {
    /// Directory searched for specification files
    source_dir: PathBuf,
    /// File extension
    extension: String,
}

impl Loader {
    /// Create a loader from a manifest
    #[must_use]
    pub fn from_manifest(manifest: &Manifest, root: &Path) -> Self {
        Self {
            source_dir: root.join(&manifest.source.dir),
            extension: manifest.source.extension.clone(),
        }
    }

    /// Load and parse a single file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load_file(path: &Path) -> Result<SourceFile, LoadError> {
        debug!(path = %path.display(), "loading specification");

        let source = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        match parser::parse(&source) {
            Ok(spec) => Ok(SourceFile {
                path: path.to_path_buf(),
                source,
                spec,
            }),
            Err(error) => {
                warn!(path = %path.display(), %error, "specification failed to parse");
                Err(LoadError::Parse {
                    path: path.to_path_buf(),
                    source_text: source,
                    error,
                })
            }
        }
    }

    /// Load every specification under a manifest's source directory
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded or the source
    /// directory holds no specification files. Failures of individual files
    /// are collected in [`Project::failures`] instead.
    pub fn load_project(manifest_path: &Path) -> Result<Project, LoadError> {
        let manifest = Manifest::load(manifest_path)?;

        let root = manifest_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let loader = Self::from_manifest(&manifest, &root);
        let files = loader.collect_source_files()?;

        if files.is_empty() {
            return Err(LoadError::NoSources {
                dir: loader.source_dir,
            });
        }

        debug!(project = %manifest.project.name, files = files.len(), "loading project");
        Ok(Self::load_all(manifest, root, &files))
    }

    /// Load whatever `path` points at
    ///
    /// A manifest file or a specification file is loaded directly. For a
    /// directory, a manifest inside it or in any parent wins; without one,
    /// every `.quark` file directly inside the directory is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing loadable is found at `path`.
    pub fn discover(path: &Path) -> Result<Project, LoadError> {
        if path.is_file() {
            if path.file_name().and_then(|s| s.to_str()) == Some(MANIFEST_FILE) {
                return Self::load_project(path);
            }
            return Ok(Self::load_single(path));
        }

        if let Ok(manifest_path) = Manifest::find(path) {
            return Self::load_project(&manifest_path);
        }

        let loader = Self {
            source_dir: path.to_path_buf(),
            extension: default_extension(),
        };
        let mut files: Vec<_> = Self::read_dir(path)?
            .into_iter()
            .filter(|p| p.is_file() && loader.matches_extension(p))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(LoadError::NoProject(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");
        Ok(Self::load_all(Manifest::new(name), path.to_path_buf(), &files))
    }

    fn load_single(path: &Path) -> Project {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");

        let root = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        Self::load_all(Manifest::new(name), root, &[path.to_path_buf()])
    }

    fn load_all(manifest: Manifest, root: PathBuf, files: &[PathBuf]) -> Project {
        let mut sources = Vec::new();
        let mut failures = Vec::new();

        for path in files {
            match Self::load_file(path) {
                Ok(file) => sources.push(file),
                Err(e) => failures.push(e),
            }
        }

        Project {
            manifest,
            root,
            sources,
            failures,
        }
    }

    fn collect_source_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let mut files = Vec::new();

        if !self.source_dir.exists() {
            return Ok(files);
        }

        self.collect_files_recursive(&self.source_dir, &mut files)?;

        // Sort for deterministic ordering
        files.sort();

        Ok(files)
    }

    fn collect_files_recursive(
        &self,
        dir: &Path,
        files: &mut Vec<PathBuf>,
    ) -> Result<(), LoadError> {
        for path in Self::read_dir(dir)? {
            if path.is_dir() {
                self.collect_files_recursive(&path, files)?;
            } else if self.matches_extension(&path) {
                files.push(path);
            }
        }

        Ok(())
    }

    fn read_dir(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        let entries = std::fs::read_dir(dir).map_err(|e| LoadError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        entries
            .map(|entry| {
                entry.map(|e| e.path()).map_err(|e| LoadError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                })
            })
            .collect()
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(self.extension.as_str())
    }
}

/// Errors that can occur when loading specifications
#[derive(Debug, Error)]
pub enum LoadError {
    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    /// IO error
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Parse error
    #[error("Parse error in {}: {error}", path.display())]
    Parse {
        /// Path that caused the error
        path: PathBuf,
        /// Text of the file, for rendering the diagnostic
        source_text: String,
        /// Parse error
        error: ParseError,
    },
    /// No source files found under a manifest
    #[error("No source files found in {}", dir.display())]
    NoSources {
        /// Directory that was searched
        dir: PathBuf,
    },
    /// Nothing loadable at the given path
    #[error("No Quark project found at {}. Run 'quark init' to create one.", .0.display())]
    NoProject(PathBuf),
}
