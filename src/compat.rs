//! Status-string boundary for existing callers
//!
//! Older callers receive a `(spec, status)` pair where the status is the
//! literal string `"nil"` on success and the error message otherwise. New
//! code should call [`crate::parse`] and match on the `Result` instead.

use crate::ast::Spec;
use crate::parser;

/// Status string reported when parsing succeeded
pub const SUCCESS: &str = "nil";

/// Parse a specification, reporting the outcome as a status string
///
/// Returns `(Some(spec), "nil")` on success and `(None, message)` on
/// failure. A caller must compare the status against [`SUCCESS`]; an empty
/// status is not a success.
#[must_use]
pub fn parse_status(source: &str) -> (Option<Spec>, String) {
    match parser::parse(source) {
        Ok(spec) => (Some(spec), SUCCESS.to_string()),
        Err(err) => (None, err.to_string()),
    }
}

/// Whether a status string returned by [`parse_status`] means success
#[must_use]
pub fn is_success(status: &str) -> bool {
    status == SUCCESS
}
