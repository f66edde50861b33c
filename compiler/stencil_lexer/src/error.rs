//! Lexical errors.
//!
//! The scanner and the markup lexer fail fast: the first error aborts the
//! whole scan and no partial fragment or token list is returned.

use crate::Span;
use std::fmt;

/// Typed category of a lexical error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A `{{` or `{%` with no matching `}}` / `%}`.
    UnterminatedDelimiter { open: &'static str },
    /// A quote with no matching closing quote.
    UnterminatedString,
    /// A character that starts no token (strict mode only).
    UnexpectedCharacter { ch: char },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedDelimiter { open } => {
                let close = if *open == "{{" { "}}" } else { "%}" };
                write!(f, "`{open}` was never closed with `{close}`")
            }
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnexpectedCharacter { ch } => write!(f, "unexpected character `{ch}`"),
        }
    }
}

/// A lexical error with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    /// Re-anchor a markup-relative error onto the enclosing template source.
    #[must_use]
    pub fn offset_by(self, base: usize) -> Self {
        LexError {
            kind: self.kind,
            span: self.span.offset_by(base),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for LexError {}
