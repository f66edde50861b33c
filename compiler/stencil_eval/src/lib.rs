//! Stencil evaluator - node tree, tags, filters and the render context.
//!
//! Compilation turns fragments into a [`BlockBody`] through a
//! [`TemplateParser`], dispatching tag names through a [`TagRegistry`].
//! Rendering walks that body with a [`Context`], resolving filters through
//! a [`FilterRegistry`].
//!
//! # Extension points
//!
//! - [`TagDefinition`] + [`CustomTag`]: host tags, registered by name
//! - [`Filter`]: host filters, including plain closures
//! - [`UnknownTagHandler`]: how a body reacts to tags it does not know

mod context;
mod error;
mod filters;
mod node;
mod parser;
mod registry;
mod stack;
pub mod tags;
mod variable;

pub use context::{Context, Interrupt, LoopScope};
pub use error::{
    argument_error, structural, unknown_filter, wrong_arg_count, wrong_arg_type, RenderError,
    RenderErrorKind,
};
pub use filters::{Filter, FilterRegistry};
pub use node::{BlockBody, BlockEnd, CustomTag, Node, TopLevel, UnknownTagHandler};
pub use parser::TemplateParser;
pub use registry::{TagDefinition, TagRegistry};
pub use stack::ensure_sufficient_stack;
pub use variable::{FilterCall, Variable};

#[cfg(test)]
mod test_helpers;
