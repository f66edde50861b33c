//! The facade's single error type.

use stencil_eval::RenderError;
use stencil_lexer::Span;
use stencil_parse::ParseError;
use thiserror::Error;

/// A compile or render failure.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// The template failed to compile; no template was produced.
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    /// A render was aborted.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl TemplateError {
    pub fn span(&self) -> Option<Span> {
        match self {
            TemplateError::Parse(err) => err.span,
            TemplateError::Render(err) => err.span,
        }
    }

    /// 1-based line and column (in characters) of the error's start within
    /// `source`.
    pub fn line_col(&self, source: &str) -> Option<(usize, usize)> {
        self.span().map(|span| span.line_col(source))
    }
}
