//! Structured parse errors.
//!
//! Any grammar mismatch is fatal: the parser stops at the first error and
//! propagates it out of the session. The `Display` output is the exact
//! one-line diagnostic the CLI prints to stderr before exiting non-zero;
//! the span is kept alongside so callers and tests can resolve the
//! position.

use serde::{Deserialize, Serialize};
use verdict_source::Span;

/// The result type of every parser production.
pub type ParseResult<T> = Result<T, ParseError>;

/// A fatal syntax error.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error, Serialize, Deserialize)]
pub enum ParseError {
    /// A specific token was required but something else was found.
    #[error("Syntax Error: Expected '{expected}' but got '{found}'")]
    Expected {
        /// What the grammar required at this point.
        expected: String,
        /// The text of the token actually found (empty at end of input).
        found: String,
        /// Where the mismatch occurred.
        span: Span,
    },

    /// Statement dispatch found a token no statement production starts with.
    #[error("Syntax Error in Statement: Unexpected token '{found}'")]
    UnexpectedStatement {
        /// The text of the offending token (empty at end of input).
        found: String,
        /// Where the mismatch occurred.
        span: Span,
    },
}

impl ParseError {
    /// Returns the source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Expected { span, .. } | ParseError::UnexpectedStatement { span, .. } => {
                *span
            }
        }
    }
}
