//! Markup tokens.

use crate::Span;
use std::fmt;

/// Token categories produced by the markup lexer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `==`, `!=`, `<>`, `<=`, `>=`, `<`, `>` or `contains`.
    Comparison,
    /// Single- or double-quoted string, quotes included in the lexeme.
    String,
    Integer,
    Float,
    Identifier,
    /// `..`
    Range,
    Pipe,
    Dot,
    Colon,
    Comma,
    OpenSquare,
    CloseSquare,
    OpenRound,
    CloseRound,
    Question,
    Dash,
    /// Sentinel closing every token list.
    EndOfString,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Comparison => "comparison operator",
            TokenKind::String => "string",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Identifier => "identifier",
            TokenKind::Range => "`..`",
            TokenKind::Pipe => "`|`",
            TokenKind::Dot => "`.`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::OpenSquare => "`[`",
            TokenKind::CloseSquare => "`]`",
            TokenKind::OpenRound => "`(`",
            TokenKind::CloseRound => "`)`",
            TokenKind::Question => "`?`",
            TokenKind::Dash => "`-`",
            TokenKind::EndOfString => "end of markup",
        }
    }

    /// Punctuation for a single byte, if it is one.
    pub(crate) const fn punctuation(byte: u8) -> Option<TokenKind> {
        match byte {
            b'|' => Some(TokenKind::Pipe),
            b'.' => Some(TokenKind::Dot),
            b':' => Some(TokenKind::Colon),
            b',' => Some(TokenKind::Comma),
            b'[' => Some(TokenKind::OpenSquare),
            b']' => Some(TokenKind::CloseSquare),
            b'(' => Some(TokenKind::OpenRound),
            b')' => Some(TokenKind::CloseRound),
            b'?' => Some(TokenKind::Question),
            b'-' => Some(TokenKind::Dash),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token: a typed slice of the markup it was lexed from.
///
/// `span` is relative to the markup string handed to the lexer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub const fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Token { kind, text, span }
    }

    /// The contents of a string token without its quotes.
    ///
    /// Other token kinds return their text unchanged.
    pub fn unquoted(&self) -> &'a str {
        if self.kind == TokenKind::String && self.text.len() >= 2 {
            &self.text[1..self.text.len() - 1]
        } else {
            self.text
        }
    }
}
