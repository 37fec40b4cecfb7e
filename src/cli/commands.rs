//! CLI commands implementation

use crate::lexer::{self, Lexeme, Token};
use crate::project::{LoadError, Loader, Manifest, MANIFEST_FILE};
use clap::{Parser, Subcommand, ValueEnum};
use miette::{NamedSource, Report};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Quark contract specification CLI
#[derive(Parser, Debug)]
#[command(name = "quark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log parser activity to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Quark project
    Init {
        /// Project name
        name: String,
        /// Directory to create the project in (defaults to project name)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Check specifications for errors
    Check {
        /// Path to a manifest, a directory or a source file
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the parsed form of a specification
    Dump {
        /// Source file
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Json)]
        format: DumpFormat,
    },

    /// Print the tokens of a source file
    Tokens {
        /// Source file
        file: PathBuf,
        /// Include whitespace tokens
        #[arg(short = 'w', long)]
        whitespace: bool,
    },
}

/// Output format for `quark dump`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// Pretty-printed JSON
    Json,
    /// Rust debug representation
    Debug,
}

/// Run the CLI with the given arguments
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Init { name, path } => cmd_init(&name, path.as_deref()),
        Commands::Check { path } => cmd_check(&path),
        Commands::Dump { file, format } => cmd_dump(&file, format),
        Commands::Tokens { file, whitespace } => cmd_tokens(&file, whitespace),
    }
}

fn cmd_init(name: &str, path: Option<&Path>) -> Result<(), CliError> {
    let project_dir = path.map_or_else(|| PathBuf::from(name), Path::to_path_buf);

    // Check if directory already exists and is not empty
    if project_dir.exists() {
        let is_empty = project_dir
            .read_dir()
            .map(|mut d| d.next().is_none())
            .unwrap_or(false);

        if !is_empty {
            return Err(CliError::DirectoryNotEmpty(project_dir));
        }
    }

    let specs_dir = project_dir.join("specs");
    fs::create_dir_all(&specs_dir).map_err(|e| CliError::Io {
        path: specs_dir.clone(),
        source: e,
    })?;

    let manifest = Manifest::new(name);
    let manifest_path = project_dir.join(MANIFEST_FILE);
    manifest.save(&manifest_path).map_err(LoadError::from)?;

    let spec_name = name.replace('-', "_");
    let example_spec = format!(
        "spec {spec_name} Debtor to Creditor\n\
         \x20   create Offered [item, price=10]\n\
         \x20   detach Paid [price=10]\n\
         \x20   discharge Delivered [item]\n"
    );

    let spec_path = specs_dir.join(format!("main.{}", manifest.source.extension));
    fs::write(&spec_path, example_spec).map_err(|e| CliError::Io {
        path: spec_path.clone(),
        source: e,
    })?;

    println!("Created new Quark project: {name}");
    println!("  {}", manifest_path.display());
    println!("  {}", spec_path.display());
    println!("\nTo get started:");
    println!("  cd {}", project_dir.display());
    println!("  quark check");

    Ok(())
}

fn cmd_check(path: &Path) -> Result<(), CliError> {
    let project = Loader::discover(path)?;

    println!("Checking {}...", project.name());

    for file in &project.sources {
        println!("  ok: {}", file.path.display());
    }

    if project.has_errors() {
        let errors = project.errors();
        println!("\nFound {} error(s):\n", errors.len());

        for error in errors {
            eprintln!("{:?}", render(error));
        }

        return Err(CliError::CheckFailed(errors.len()));
    }

    println!("\n{} specification(s), no errors found.", project.sources.len());

    Ok(())
}

fn cmd_dump(file: &Path, format: DumpFormat) -> Result<(), CliError> {
    let source = Loader::load_file(file).map_err(fail_one)?;

    match format {
        DumpFormat::Json => {
            let json = serde_json::to_string_pretty(&source.spec)?;
            println!("{json}");
        }
        DumpFormat::Debug => println!("{:#?}", source.spec),
    }

    Ok(())
}

fn cmd_tokens(file: &Path, whitespace: bool) -> Result<(), CliError> {
    let source = fs::read_to_string(file).map_err(|e| CliError::Io {
        path: file.to_path_buf(),
        source: e,
    })?;

    for lexeme in lexer::tokenize(&source) {
        if lexeme.token == Token::Whitespace && !whitespace {
            continue;
        }
        println!("{}", token_row(&lexeme));
    }

    Ok(())
}

/// One line of `quark tokens` output: span, kind and escaped literal
fn token_row(lexeme: &Lexeme<'_>) -> String {
    let kind = if lexeme.token.is_keyword() {
        format!("{:?} (keyword)", lexeme.token)
    } else {
        format!("{:?}", lexeme.token)
    };
    format!(
        "{:>5}..{:<5} {kind:<18} {:?}",
        lexeme.span.start, lexeme.span.end, lexeme.literal
    )
}

/// Render a load error, with the source snippet for parse errors
fn render(error: &LoadError) -> Report {
    match error {
        LoadError::Parse {
            path,
            source_text,
            error,
        } => Report::new(error.clone()).with_source_code(NamedSource::new(
            path.display().to_string(),
            source_text.clone(),
        )),
        other => miette::miette!("{other}"),
    }
}

/// Print a single-file failure and turn it into a CLI error
fn fail_one(error: LoadError) -> CliError {
    if matches!(error, LoadError::Parse { .. }) {
        eprintln!("{:?}", render(&error));
        return CliError::CheckFailed(1);
    }
    CliError::Load(error)
}

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Load error
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    /// JSON output error
    #[error("Failed to serialize specification: {0}")]
    Json(#[from] serde_json::Error),
    /// Check failed
    #[error("Check failed with {0} error(s)")]
    CheckFailed(usize),
    /// Directory not empty
    #[error("Directory {} is not empty", .0.display())]
    DirectoryNotEmpty(PathBuf),
}
