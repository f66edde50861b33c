//! Expressions: literals and lookup chains.
//!
//! # Grammar
//!
//! ```text
//! expression := <end>                     -> nil
//!             | string | integer | float  -> literal
//!             | lookup
//! lookup     := head ( "." key | "[" expression "]" )*
//! head       := identifier | "[" expression "]"
//! key        := identifier | integer
//! ```
//!
//! A lookup made of a single plain `nil`, `null`, `true` or `false` key is
//! collapsed to the literal at parse time, so those names can never reach
//! data at the top level.
//!
//! Evaluation is total: every failed step resolves to nil.

use crate::{Cursor, ParseError, ParseErrorKind};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use stencil_lexer::TokenKind;
use stencil_value::Data;

/// A parsed expression. Immutable after parse.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Lookup(Lookup),
}

/// One step of a lookup chain.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// `.name` or the leading identifier.
    Key(String),
    /// `[expression]`, evaluated against the data root.
    Index(Box<Expression>),
}

/// A dotted/bracketed path walked from the data root.
#[derive(Clone, Debug, PartialEq)]
pub struct Lookup {
    pub segments: SmallVec<[Segment; 4]>,
}

impl Expression {
    /// Parse one expression starting at the cursor.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Expression, ParseError> {
        let token = *cursor.current();
        let span = cursor.current_span();
        match token.kind {
            TokenKind::EndOfString => Ok(Expression::Nil),
            TokenKind::String => {
                cursor.consume();
                Ok(Expression::String(token.unquoted().to_owned()))
            }
            TokenKind::Integer => {
                cursor.consume();
                token.text.parse().map(Expression::Int).map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: token.text.to_owned(),
                        },
                        Some(span),
                    )
                })
            }
            TokenKind::Float => {
                cursor.consume();
                token.text.parse().map(Expression::Float).map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: token.text.to_owned(),
                        },
                        Some(span),
                    )
                })
            }
            _ => Lookup::parse(cursor).map(Lookup::into_expression),
        }
    }

    /// Evaluate against `root`. Never fails.
    pub fn evaluate(&self, root: &Data) -> Data {
        match self {
            Expression::Nil => Data::Nil,
            Expression::Bool(b) => Data::Bool(*b),
            Expression::Int(n) => Data::Int(*n),
            Expression::Float(x) => Data::Float(*x),
            Expression::String(s) => Data::String(s.clone()),
            Expression::Lookup(lookup) => lookup.resolve(root).into_owned(),
        }
    }
}

impl Lookup {
    /// Parse a lookup chain. The cursor must be at an identifier or `[`.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Lookup, ParseError> {
        let mut segments = SmallVec::new();
        if cursor.look(TokenKind::OpenSquare, 0) {
            segments.push(Self::parse_index(cursor)?);
        } else {
            let head = cursor.expect(TokenKind::Identifier)?;
            segments.push(Segment::Key(head.text.to_owned()));
        }

        loop {
            if cursor.try_consume(TokenKind::Dot).is_some() {
                let token = *cursor.current();
                match token.kind {
                    TokenKind::Identifier | TokenKind::Integer => {
                        cursor.consume();
                        segments.push(Segment::Key(token.text.to_owned()));
                    }
                    // `items.1.2` lexes its tail as the float `1.2`.
                    TokenKind::Float => {
                        cursor.consume();
                        for part in token.text.split('.') {
                            segments.push(Segment::Key(part.to_owned()));
                        }
                    }
                    _ => return Err(cursor.unexpected(TokenKind::Identifier)),
                }
            } else if cursor.look(TokenKind::OpenSquare, 0) {
                segments.push(Self::parse_index(cursor)?);
            } else {
                break;
            }
        }

        Ok(Lookup { segments })
    }

    fn parse_index(cursor: &mut Cursor<'_>) -> Result<Segment, ParseError> {
        cursor.expect(TokenKind::OpenSquare)?;
        let key = Expression::parse(cursor)?;
        cursor.expect(TokenKind::CloseSquare)?;
        Ok(Segment::Index(Box::new(key)))
    }

    fn into_expression(self) -> Expression {
        if let [Segment::Key(name)] = self.segments.as_slice() {
            match name.as_str() {
                "nil" | "null" => return Expression::Nil,
                "true" => return Expression::Bool(true),
                "false" => return Expression::Bool(false),
                _ => {}
            }
        }
        Expression::Lookup(self)
    }

    /// Walk the chain from `root`, borrowing as long as no step had to
    /// materialize a value.
    pub fn resolve<'d>(&self, root: &'d Data) -> Cow<'d, Data> {
        let mut current = Cow::Borrowed(root);
        for segment in &self.segments {
            current = match current {
                Cow::Borrowed(data) => segment.step(data, root),
                Cow::Owned(data) => Cow::Owned(segment.step(&data, root).into_owned()),
            };
        }
        current
    }
}

impl Segment {
    fn step<'d>(&self, data: &'d Data, root: &Data) -> Cow<'d, Data> {
        match self {
            Segment::Key(name) => data.member(name),
            Segment::Index(key) => data.index(&key.evaluate(root)),
        }
    }
}

/// Textual form, close to how the expression was written.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Nil => f.write_str("nil"),
            Expression::Bool(b) => write!(f, "{b}"),
            Expression::Int(n) => write!(f, "{n}"),
            Expression::Float(x) => write!(f, "{}", Data::Float(*x)),
            Expression::String(s) if s.contains('\'') => write!(f, "\"{s}\""),
            Expression::String(s) => write!(f, "'{s}'"),
            Expression::Lookup(lookup) => fmt::Display::fmt(lookup, f),
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(name) if i == 0 => f.write_str(name)?,
                Segment::Key(name) => write!(f, ".{name}")?,
                Segment::Index(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests;
