//! Parser error types

// The unused_assignments warnings are false positives - fields are used by thiserror Display derive
#![allow(unused_assignments)]

use crate::lexer::Lexeme;
use crate::Span;
use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// A parse error at the first grammar violation in the source
///
/// The offending literal is quoted and escaped in the message, so quotes and
/// control characters in the source cannot garble it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// The token does not match the one kind required at this position
    #[error("found {found:?}, expected {expected}")]
    #[diagnostic(code(quark::parse::unexpected_token))]
    UnexpectedToken {
        /// Literal text of the offending token
        found: SmolStr,
        /// What we expected
        expected: String,
        /// Location of the error
        #[label("expected {expected}")]
        span: Span,
    },

    /// An event argument list is missing a field, a value or a separator
    #[error("found {found:?}, expected {expected}")]
    #[diagnostic(code(quark::parse::malformed_argument))]
    MalformedArgument {
        /// Literal text of the offending token
        found: SmolStr,
        /// What we expected
        expected: String,
        /// Location of the error
        #[label("expected {expected}")]
        span: Span,
    },
}

impl ParseError {
    /// Create an unexpected token error
    pub fn unexpected(expected: impl Into<String>, found: &Lexeme<'_>) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.literal.into(),
            span: found.span,
        }
    }

    /// Create a malformed argument list error
    pub fn malformed_argument(expected: impl Into<String>, found: &Lexeme<'_>) -> Self {
        ParseError::MalformedArgument {
            expected: expected.into(),
            found: found.literal.into(),
            span: found.span,
        }
    }

    /// Literal text of the offending token
    #[must_use]
    pub fn found(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::MalformedArgument { found, .. } => found,
        }
    }

    /// Description of what the grammar required
    #[must_use]
    pub fn expected(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::MalformedArgument { expected, .. } => expected,
        }
    }

    /// Get the span of the error
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::MalformedArgument { span, .. } => *span,
        }
    }
}
