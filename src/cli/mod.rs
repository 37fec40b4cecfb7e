//! Command-line interface module
//!
//! This module provides the CLI for Quark:
//!
//! - `quark check` - Validate specifications
//! - `quark dump` - Print a parsed specification as JSON
//! - `quark tokens` - Print the token stream of a file
//! - `quark init` - Create a new project

mod commands;

pub use commands::{run, Cli, CliError, Commands, DumpFormat};
