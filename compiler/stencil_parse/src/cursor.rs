//! Token cursor for navigating one fragment's token list.
//!
//! Provides look-ahead, consumption and backtracking. The token list always
//! ends with an [`TokenKind::EndOfString`] sentinel and the cursor never
//! moves past it, so every access is in bounds.

use crate::{ParseError, ParseErrorKind};
use stencil_lexer::{lex, LexMode, Span, Token, TokenKind};
use tracing::trace;

/// Cursor over the tokens of one markup string.
///
/// Token spans are relative to the markup; `base` is the markup's offset in
/// the template source and is added to every span the cursor reports.
pub struct Cursor<'a> {
    tokens: Vec<Token<'a>>,
    base: usize,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Lex `markup` (found at byte `base` of the template) and wrap the result.
    pub fn lex(markup: &'a str, base: usize, mode: LexMode) -> Result<Self, ParseError> {
        let tokens = lex(markup, mode).map_err(|err| ParseError::from(err.offset_by(base)))?;
        Ok(Self::new(tokens, base))
    }

    /// Wrap an already lexed token list.
    ///
    /// An `EndOfString` sentinel is appended if the list lacks one.
    pub fn new(mut tokens: Vec<Token<'a>>, base: usize) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfString) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::EndOfString, "", Span::new(end, end)));
        }
        Cursor {
            tokens,
            base,
            pos: 0,
        }
    }

    /// Current position, for a later [`Cursor::jump`].
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reset the cursor to a position previously returned by `position`.
    ///
    /// Positions past the sentinel are clamped to it.
    pub fn jump(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len() - 1);
    }

    /// The current token.
    #[inline]
    pub fn current(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    /// Absolute source span of the current token.
    pub fn current_span(&self) -> Span {
        self.current().span.offset_by(self.base)
    }

    /// Is the token `distance` places ahead of type `kind`?
    ///
    /// Past the end of the stream this is simply false.
    pub fn look(&self, kind: TokenKind, distance: usize) -> bool {
        self.tokens
            .get(self.pos + distance)
            .is_some_and(|t| t.kind == kind)
    }

    /// Is the current token the identifier `text`?
    pub fn look_id(&self, text: &str) -> bool {
        let token = self.current();
        token.kind == TokenKind::Identifier && token.text == text
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.look(TokenKind::EndOfString, 0)
    }

    /// Take the current token unconditionally and advance.
    ///
    /// At the sentinel the cursor stays put and keeps returning it.
    pub fn consume(&mut self) -> Token<'a> {
        let token = self.tokens[self.pos];
        if token.kind != TokenKind::EndOfString {
            self.pos += 1;
        }
        trace!(kind = ?token.kind, text = token.text, "consume");
        token
    }

    /// Take the current token, which must be of type `kind`.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.look(kind, 0) {
            Ok(self.consume())
        } else {
            Err(self.unexpected(kind))
        }
    }

    /// Take the current token if it is of type `kind`.
    pub fn try_consume(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        if self.look(kind, 0) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Take the current token if it is the identifier `text`.
    pub fn try_consume_id(&mut self, text: &str) -> Option<Token<'a>> {
        if self.look_id(text) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Require that every token has been consumed.
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::EndOfString).map(|_| ())
    }

    /// Error describing the current token where `expected` was required.
    #[cold]
    pub fn unexpected(&self, expected: TokenKind) -> ParseError {
        let found = self.current();
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected,
                found: found.kind,
                text: found.text.to_owned(),
            },
            Some(self.current_span()),
        )
    }
}
