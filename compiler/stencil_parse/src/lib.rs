//! Stencil parser - token cursor and expression grammar.
//!
//! Tag grammars are built on [`Cursor`]; every value position in a tag
//! (conditions, loop collections, filter arguments) is an [`Expression`].

mod cursor;
mod error;
mod expression;

pub use cursor::Cursor;
pub use error::{syntax_error, unknown_tag, unterminated_tag, ParseError, ParseErrorKind};
pub use expression::{Expression, Lookup, Segment};
