//! Token types for the Verilog-subset lexer.
//!
//! Tokens carry a coarse [`TokenKind`] and a [`Span`]; the token text is
//! never copied, only recovered from the source buffer using the span.
//! Numeric literals in particular are kept verbatim so the evaluator can
//! reparse them with its own width and base logic.

use serde::{Deserialize, Serialize};
use verdict_source::Span;

/// The kind of a lexed token.
///
/// The lexer is total: every byte of input is classified into one of these
/// kinds, with unrecognized bytes becoming one-character [`Symbol`] tokens.
///
/// [`Symbol`]: TokenKind::Symbol
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    /// A name that is not a reserved word (e.g., `clk`, `STATE_IDLE`).
    Identifier,
    /// One of the reserved words listed in [`is_keyword`].
    Keyword,
    /// A numeric literal, including sized/based forms (`42`, `8'hFF`).
    Number,
    /// An operator or punctuation character, or one of the two-character
    /// operators (`<=`, `>=`, `==`, `!=`, `<<`, `>>`, `&&`, `||`).
    Symbol,
    /// End of input. The stream yields this sentinel forever once reached.
    End,
}

/// A lexed token with its kind and source location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// The kind of this token.
    pub kind: TokenKind,
    /// The source span covering this token's text.
    pub span: Span,
}

impl Token {
    /// Returns `true` if this is the end-of-input sentinel.
    pub fn is_end(self) -> bool {
        self.kind == TokenKind::End
    }
}

/// Returns `true` if the given word is one of the reserved words of the
/// supported Verilog subset. Keywords are case-sensitive.
pub fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "module"
            | "endmodule"
            | "input"
            | "output"
            | "inout"
            | "reg"
            | "wire"
            | "assign"
            | "always"
            | "posedge"
            | "negedge"
            | "begin"
            | "end"
            | "if"
            | "else"
            | "parameter"
            | "or"
            | "case"
            | "endcase"
            | "default"
    )
}
