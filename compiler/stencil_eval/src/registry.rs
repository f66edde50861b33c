//! Tag registry for looking up tag definitions by name.

use crate::tags::{
    AssignTag, CaptureTag, CaseTag, CommentTag, CounterTag, CycleTag, ForTag, IfTag,
    IfchangedTag, InterruptTag, RawTag,
};
use crate::{Interrupt, Node, TemplateParser};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use stencil_lexer::TagParts;
use stencil_parse::ParseError;

/// Compile-time half of a tag: turns a tag fragment, plus any body it
/// consumes from the parser, into a node.
pub trait TagDefinition: Send + Sync {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError>;
}

/// Name to tag-definition mapping.
#[derive(Clone, Default)]
pub struct TagRegistry {
    tags: FxHashMap<String, Arc<dyn TagDefinition>>,
}

impl TagRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in tags.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("if", Arc::new(IfTag { negate: false }));
        registry.register("unless", Arc::new(IfTag { negate: true }));
        registry.register("case", Arc::new(CaseTag));
        registry.register("for", Arc::new(ForTag));
        registry.register("cycle", Arc::new(CycleTag));
        registry.register("assign", Arc::new(AssignTag));
        registry.register("capture", Arc::new(CaptureTag));
        registry.register("increment", Arc::new(CounterTag { step: 1 }));
        registry.register("decrement", Arc::new(CounterTag { step: -1 }));
        registry.register("ifchanged", Arc::new(IfchangedTag));
        registry.register("comment", Arc::new(CommentTag));
        registry.register("raw", Arc::new(RawTag));
        registry.register("break", Arc::new(InterruptTag(Interrupt::Break)));
        registry.register("continue", Arc::new(InterruptTag(Interrupt::Continue)));
        registry
    }

    /// Add or replace the tag called `name`.
    pub fn register(&mut self, name: impl Into<String>, definition: Arc<dyn TagDefinition>) {
        self.tags.insert(name.into(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&dyn TagDefinition> {
        self.tags.get(name).map(|definition| &**definition)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.names())
            .finish()
    }
}
