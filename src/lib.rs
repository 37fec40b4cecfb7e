//! Quark: a specification language for commitments between two parties
//!
//! A Quark specification names a debtor, a creditor, and the three events of
//! the commitment's lifecycle, each with an ordered argument list.
//!
//! # Example
//!
//! ```quark
//! spec Loan Lender to Borrower
//!     create Created [amount=100, currency=USD]
//!     detach Detached [reason]
//!     discharge Discharged [amount=100]
//! ```
//!
//! ```
//! let spec = quark::parse(
//!     "spec Loan L to B create Created [amount=100] detach Detached [reason] \
//!      discharge Discharged [amount=100]",
//! )
//! .unwrap();
//! assert_eq!(spec.constraint.debtor, "L");
//! assert_eq!(spec.detach.args[0].value, None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod cli;
pub mod compat;
pub mod lexer;
pub mod parser;
pub mod project;

pub use ast::{Arg, Constraint, Event, EventKind, Spec};
pub use parser::{parse, ParseError, ParseResult};

use std::io::Read;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no text (end of input)
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl From<logos::Span> for Span {
    fn from(span: logos::Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// A human-readable source location (1-indexed line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Compute the line and column for a byte offset in source text
    #[must_use]
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut line = 1;
        let mut column = 1;

        for (i, ch) in source.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Failure to read or parse a specification from a reader
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The source could not be read as UTF-8 text
    #[error("failed to read specification source: {0}")]
    Io(#[from] std::io::Error),
    /// The source was read but does not parse
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Read a whole specification from `reader`, then parse it
///
/// # Errors
///
/// Returns [`ReadError::Io`] if reading fails or the text is not UTF-8, and
/// [`ReadError::Parse`] for the first grammar violation.
pub fn parse_reader(mut reader: impl Read) -> Result<Spec, ReadError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    Ok(parse(&source)?)
}
