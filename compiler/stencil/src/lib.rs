//! Stencil - a Liquid-style template engine.
//!
//! Templates are compiled once into an immutable node tree and rendered any
//! number of times against caller-supplied [`Data`].
//!
//! ```text
//! Hello {{ user.name | capitalize }}!
//! {% for item in items limit:3 %}{{ forloop.index }}. {{ item }}
//! {% endfor %}
//! ```
//!
//! # Usage
//!
//! ```
//! use stencil::{Data, Engine, Hash};
//!
//! let engine = Engine::default();
//! let template = engine.compile("Hello {{ name }}!").unwrap();
//!
//! let mut data = Data::Hash(Hash::from_pairs([("name", Data::from("world"))]).unwrap());
//! assert_eq!(engine.render(&template, &mut data).unwrap(), "Hello world!");
//! ```
//!
//! # Extending
//!
//! Tags and filters are looked up by name in the [`Config`] handed to the
//! [`Engine`]. There is no global registration: two engines with different
//! configs can coexist in one process.

mod config;
mod engine;
mod error;

pub use config::Config;
pub use engine::{Engine, Template};
pub use error::TemplateError;

pub use stencil_eval::{
    argument_error, wrong_arg_count, wrong_arg_type, BlockBody, Context, CustomTag, Filter,
    FilterRegistry, Node, RenderError, RenderErrorKind, TagDefinition, TagRegistry,
    TemplateParser,
};
pub use stencil_lexer::{LexMode, Span, TagParts};
pub use stencil_parse::{Expression, ParseError, ParseErrorKind};
pub use stencil_value::{Data, DropObject, Hash, SharedDrop, ValueError};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times; only the first call has an effect, and only
/// when `RUST_LOG` is set. Enable with `RUST_LOG=stencil=debug` or
/// `RUST_LOG=stencil_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
