//! Project management module
//!
//! This module handles Quark project configuration and multi-file loading:
//!
//! - `Manifest`: Project configuration from `quark.toml`
//! - `Project`: Loaded specifications, with per-file failures
//! - `Loader`: File, directory and manifest discovery

mod loader;
mod manifest;

pub use loader::{LoadError, Loader, Project, SourceFile};
pub use manifest::{Manifest, ManifestError, ProjectInfo, SourceConfig, MANIFEST_FILE};
