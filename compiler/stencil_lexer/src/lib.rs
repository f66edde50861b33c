//! Stencil lexer - fragment scanning and markup tokenization.
//!
//! Two passes, both producing borrowed slices of the template source:
//!
//! - [`scan`] splits a template into text, `{{ object }}` and `{% tag %}`
//!   fragments.
//! - [`lex`] tokenizes the inner markup of one object or tag fragment.
//!
//! Neither pass allocates per character; both fail fast with a [`LexError`].

mod error;
mod fragment;
mod markup;
mod span;
mod token;

pub use error::{LexError, LexErrorKind};
pub use fragment::{scan, Fragment, FragmentKind, TagParts};
pub use markup::{lex, LexMode};
pub use span::Span;
pub use token::{Token, TokenKind};
