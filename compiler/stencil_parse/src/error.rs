//! Parse error types.
//!
//! Every compile-time failure ends up here: scanner and lexer errors are
//! converted on the way up, tag grammars report their own kinds. A parse
//! error aborts the whole compilation.

use stencil_lexer::{LexError, LexErrorKind, Span, TokenKind};
use std::fmt;

/// Typed category of a parse error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `{{`/`{%` delimiter with no matching close.
    UnterminatedDelimiter { open: &'static str },
    /// A block tag whose body reached end of input without `end<tag>`.
    UnterminatedTag { tag: String },
    UnterminatedString,
    UnexpectedCharacter { ch: char },
    /// A specific token was required and something else was found.
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
    },
    /// An integer literal that does not fit in 64 bits.
    InvalidNumber { text: String },
    /// A tag name with no registered handler.
    UnknownTag { name: String },
    /// Any other malformed tag markup.
    Syntax { message: String },
}

impl ParseErrorKind {
    /// Short headline for reports.
    pub fn title(&self) -> &'static str {
        match self {
            Self::UnterminatedDelimiter { .. } => "UNTERMINATED DELIMITER",
            Self::UnterminatedTag { .. } => "UNTERMINATED TAG",
            Self::UnterminatedString => "UNTERMINATED STRING",
            Self::UnexpectedCharacter { .. } => "UNEXPECTED CHARACTER",
            Self::UnexpectedToken { .. } => "UNEXPECTED TOKEN",
            Self::InvalidNumber { .. } => "INVALID NUMBER",
            Self::UnknownTag { .. } => "UNKNOWN TAG",
            Self::Syntax { .. } => "SYNTAX ERROR",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedDelimiter { open } => {
                let close = if *open == "{{" { "}}" } else { "%}" };
                write!(f, "`{open}` was never closed with `{close}`")
            }
            Self::UnterminatedTag { tag } => {
                write!(f, "`{tag}` tag was never closed with `end{tag}`")
            }
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnexpectedCharacter { ch } => write!(f, "unexpected character `{ch}`"),
            Self::UnexpectedToken {
                expected,
                found,
                text,
            } => {
                if text.is_empty() {
                    write!(f, "expected {expected}, found {found}")
                } else {
                    write!(f, "expected {expected}, found {found} `{text}`")
                }
            }
            Self::InvalidNumber { text } => write!(f, "number `{text}` is out of range"),
            Self::UnknownTag { name } => write!(f, "unknown tag `{name}`"),
            Self::Syntax { message } => f.write_str(message),
        }
    }
}

/// A parse error and where it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Location in the template source, when known.
    pub span: Option<Span>,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Option<Span>) -> Self {
        let message = kind.to_string();
        ParseError {
            kind,
            message,
            span,
        }
    }

    /// Attach a location if the error does not carry one yet.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let kind = match err.kind {
            LexErrorKind::UnterminatedDelimiter { open } => {
                ParseErrorKind::UnterminatedDelimiter { open }
            }
            LexErrorKind::UnterminatedString => ParseErrorKind::UnterminatedString,
            LexErrorKind::UnexpectedCharacter { ch } => ParseErrorKind::UnexpectedCharacter { ch },
        };
        ParseError::new(kind, Some(err.span))
    }
}

// Error factories

#[cold]
pub fn syntax_error(message: impl Into<String>, span: Option<Span>) -> ParseError {
    ParseError::new(
        ParseErrorKind::Syntax {
            message: message.into(),
        },
        span,
    )
}

#[cold]
pub fn unknown_tag(name: &str, span: Option<Span>) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnknownTag {
            name: name.to_owned(),
        },
        span,
    )
}

#[cold]
pub fn unterminated_tag(tag: &str, span: Option<Span>) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnterminatedTag {
            tag: tag.to_owned(),
        },
        span,
    )
}
