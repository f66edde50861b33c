//! Compile and render configuration.

use std::sync::Arc;
use stencil_eval::{Filter, FilterRegistry, TagDefinition, TagRegistry};
use stencil_lexer::LexMode;

/// Everything an [`Engine`](crate::Engine) needs besides the template.
///
/// `Config::default()` installs the built-in tags and filters with strict
/// lexing; [`Config::empty`] starts from nothing.
#[derive(Clone, Debug)]
pub struct Config {
    pub tags: TagRegistry,
    pub filters: FilterRegistry,
    pub lex_mode: LexMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tags: TagRegistry::standard(),
            filters: FilterRegistry::standard(),
            lex_mode: LexMode::Strict,
        }
    }
}

impl Config {
    /// No tags, no filters. Only text and `{{ }}` objects compile.
    pub fn empty() -> Self {
        Config {
            tags: TagRegistry::new(),
            filters: FilterRegistry::new(),
            lex_mode: LexMode::Strict,
        }
    }

    #[must_use]
    pub fn with_lex_mode(mut self, lex_mode: LexMode) -> Self {
        self.lex_mode = lex_mode;
        self
    }

    /// Add or replace a tag.
    #[must_use]
    pub fn with_tag(
        mut self,
        name: impl Into<String>,
        definition: impl TagDefinition + 'static,
    ) -> Self {
        self.tags.register(name, Arc::new(definition));
        self
    }

    /// Add or replace a filter.
    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, filter: impl Filter + 'static) -> Self {
        self.filters.register(name, filter);
        self
    }
}
