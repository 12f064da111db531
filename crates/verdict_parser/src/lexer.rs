//! Lexical analyzer for the Verilog subset.
//!
//! A single forward cursor over the source buffer producing one [`Token`]
//! per [`next_token`](Lexer::next_token) call. Whitespace, `// ...` line
//! comments, and `/* ... */` block comments are skipped internally so the
//! caller never sees them. The lexer never fails: any byte it cannot
//! classify becomes a one-character [`TokenKind::Symbol`] token, and an
//! unterminated block comment silently consumes the rest of the input.

use crate::token::{is_keyword, Token, TokenKind};
use verdict_source::{FileId, Span};

/// A streaming lexer over a single source buffer.
///
/// The stream is finite: once the cursor reaches the end of input, every
/// subsequent call returns the [`TokenKind::End`] sentinel.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    file: FileId,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    pub fn new(source: &'src str, file: FileId) -> Self {
        Self {
            source,
            pos: 0,
            file,
        }
    }

    /// Produces the next token, or the `End` sentinel at end of input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let bytes = self.source.as_bytes();
        if self.pos >= bytes.len() {
            return Token {
                kind: TokenKind::End,
                span: Span::new(self.file, self.pos as u32, self.pos as u32),
            };
        }

        let start = self.pos;
        let b = bytes[self.pos];

        // Numeric literal: a maximal run of digits, letters, and ticks.
        // The tick is part of sized literals (8'hFF); the text is kept
        // verbatim and interpreted later by the number parser.
        if b.is_ascii_digit() {
            while self.pos < bytes.len() {
                let c = bytes[self.pos];
                if c.is_ascii_digit() || is_letter(c) || c == b'\'' {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            return self.token(TokenKind::Number, start);
        }

        // Identifier or keyword.
        if is_letter(b) {
            while self.pos < bytes.len() {
                let c = bytes[self.pos];
                if is_letter(c) || c.is_ascii_digit() {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            let kind = if is_keyword(&self.source[start..self.pos]) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return self.token(kind, start);
        }

        // Two-character symbols.
        if let Some(pair) = self.source.get(self.pos..self.pos + 2) {
            if matches!(pair, "<=" | ">=" | "==" | "!=" | "<<" | ">>" | "&&" | "||") {
                self.pos += 2;
                return self.token(TokenKind::Symbol, start);
            }
        }

        // Anything else is a one-character symbol; the lexer itself never
        // fails. Advancing by the full character keeps the cursor on a
        // UTF-8 boundary for non-ASCII input.
        let char_len = self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += char_len;
        self.token(TokenKind::Symbol, start)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(self.file, start as u32, self.pos as u32),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        let bytes = self.source.as_bytes();
        loop {
            while self.pos < bytes.len() && is_space(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos + 1 >= bytes.len() || bytes[self.pos] != b'/' {
                return;
            }
            match bytes[self.pos + 1] {
                // Line comment: // ... to end of line
                b'/' => {
                    self.pos += 2;
                    while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                // Block comment: /* ... */ (an unterminated one consumes to EOF)
                b'*' => {
                    self.pos += 2;
                    while self.pos + 1 < bytes.len()
                        && !(bytes[self.pos] == b'*' && bytes[self.pos + 1] == b'/')
                    {
                        self.pos += 1;
                    }
                    if self.pos + 1 < bytes.len() {
                        self.pos += 2;
                    } else {
                        self.pos = bytes.len();
                    }
                }
                _ => return,
            }
        }
    }
}

/// ASCII letter (folded through bit 5 so one range check covers both cases)
/// or underscore.
fn is_letter(b: u8) -> bool {
    (b | 0x20).is_ascii_lowercase() || b == b'_'
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Lexes the entire source into a vector of tokens, ending with `End`.
///
/// Convenience for tests and the token-dump debug aid; the parser itself
/// pulls from the streaming [`Lexer`] directly.
pub fn lex(source: &str, file: FileId) -> Vec<Token> {
    let mut lexer = Lexer::new(source, file);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_end();
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}
