//! Render-time errors.
//!
//! Missing data is never an error: it resolves to nil. What remains are
//! dispatch failures (an unknown filter), bad arguments to a filter or tag,
//! and structural writes into data of the wrong shape. Any of them aborts
//! the current render.
//!
//! Factory functions are the public API; they populate both `kind` and
//! `message`.

use std::fmt;
use stencil_lexer::Span;
use stencil_value::ValueError;

/// Typed category of a render error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderErrorKind {
    /// A filter name with no entry in the filter registry.
    UnknownFilter { name: String },
    /// Wrong arity or wrong data variant passed to a filter or tag.
    Argument { context: String, message: String },
    /// A write into data that is not a hash.
    Structural(ValueError),
}

impl fmt::Display for RenderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFilter { name } => write!(f, "unknown filter `{name}`"),
            Self::Argument { context, message } => write!(f, "{context}: {message}"),
            Self::Structural(err) => fmt::Display::fmt(err, f),
        }
    }
}

/// A render error and where it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderError {
    pub kind: RenderErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Location in the template source, when known.
    pub span: Option<Span>,
}

impl RenderError {
    fn from_kind(kind: RenderErrorKind) -> Self {
        let message = kind.to_string();
        RenderError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a location if the error does not carry one yet.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RenderError {}

impl From<ValueError> for RenderError {
    fn from(err: ValueError) -> Self {
        structural(err)
    }
}

#[cold]
pub fn unknown_filter(name: &str) -> RenderError {
    RenderError::from_kind(RenderErrorKind::UnknownFilter {
        name: name.to_owned(),
    })
}

/// Bad argument to the filter or tag named by `context`.
#[cold]
pub fn argument_error(context: &str, message: impl Into<String>) -> RenderError {
    RenderError::from_kind(RenderErrorKind::Argument {
        context: context.to_owned(),
        message: message.into(),
    })
}

#[cold]
pub fn wrong_arg_count(context: &str, expected: &str, got: usize) -> RenderError {
    argument_error(
        context,
        format!("expected {expected} argument(s), got {got}"),
    )
}

#[cold]
pub fn wrong_arg_type(context: &str, expected: &str, got: &str) -> RenderError {
    argument_error(context, format!("expected {expected}, got {got}"))
}

#[cold]
pub fn structural(err: ValueError) -> RenderError {
    RenderError::from_kind(RenderErrorKind::Structural(err))
}
