//! Nodes, block bodies and unknown-tag handling.
//!
//! A template compiles to a [`BlockBody`]: an ordered list of [`Node`]s,
//! some of which own nested bodies. The tree is immutable after compile and
//! may be rendered any number of times.
//!
//! # Body termination
//!
//! [`BlockBody::parse`] consumes fragments until the stream is exhausted or
//! a tag name with no registry entry shows up. Either event goes to an
//! [`UnknownTagHandler`], which returns `Ok` to end the body or an error:
//!
//! - [`TopLevel`] accepts end of input and rejects any unknown name.
//! - [`BlockEnd`] accepts `end<tag>` and the block's continuation keywords
//!   (`elsif`, `else`, `when`), rejects end of input as unterminated, and
//!   defers everything else to [`TopLevel`].

use crate::stack::ensure_sufficient_stack;
use crate::tags::{AssignNode, CaptureNode, CaseNode, CycleNode, ForNode, IfNode};
use crate::{Context, RenderError, TemplateParser, Variable};
use std::fmt::{self, Write};
use stencil_lexer::{FragmentKind, Span, TagParts};
use stencil_parse::{unknown_tag, unterminated_tag, ParseError};
use stencil_value::Data;
use tracing::debug;

/// Render hook for host-registered tags.
///
/// A host tag's [`TagDefinition`](crate::TagDefinition) parses markup into a
/// value implementing this trait and wraps it in [`Node::Custom`].
pub trait CustomTag: fmt::Debug + Send + Sync {
    fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError>;
}

/// One element of a compiled template.
#[derive(Debug)]
pub enum Node {
    /// Literal text, emitted verbatim.
    Text(String),
    /// `{{ variable }}`
    Object(Variable),
    If(IfNode),
    Case(CaseNode),
    For(ForNode),
    Cycle(CycleNode),
    Assign(AssignNode),
    Capture(CaptureNode),
    /// Counter name.
    Increment(String),
    /// Counter name.
    Decrement(String),
    Ifchanged(BlockBody),
    Comment,
    Break,
    Continue,
    Custom(Box<dyn CustomTag>),
}

impl Node {
    pub fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Object(variable) => {
                let value = variable.evaluate(context)?;
                let _ = write!(out, "{value}");
            }
            Node::If(node) => node.render(context, out)?,
            Node::Case(node) => node.render(context, out)?,
            Node::For(node) => node.render(context, out)?,
            Node::Cycle(node) => node.render(context, out)?,
            Node::Assign(node) => node.render(context)?,
            Node::Capture(node) => node.render(context)?,
            Node::Increment(name) => {
                let _ = write!(out, "{}", context.increment(name));
            }
            Node::Decrement(name) => {
                let _ = write!(out, "{}", context.decrement(name));
            }
            Node::Ifchanged(body) => {
                let mut rendered = String::new();
                body.render(context, &mut rendered)?;
                let last = context.register("ifchanged");
                if last.as_str() != Some(rendered.as_str()) {
                    out.push_str(&rendered);
                    *last = Data::String(rendered);
                }
            }
            Node::Comment => {}
            Node::Break => context.set_interrupt(crate::Interrupt::Break),
            Node::Continue => context.set_interrupt(crate::Interrupt::Continue),
            Node::Custom(tag) => tag.render(context, out)?,
        }
        Ok(())
    }
}

/// An ordered sequence of nodes.
#[derive(Debug, Default)]
pub struct BlockBody {
    pub nodes: Vec<Node>,
}

impl BlockBody {
    /// Parse nodes until `handler` ends the body.
    ///
    /// Returns the body and the unregistered tag that ended it, or `None`
    /// when the fragment stream ran out.
    pub fn parse<'src>(
        parser: &mut TemplateParser<'src, '_>,
        handler: &dyn UnknownTagHandler,
    ) -> Result<(BlockBody, Option<TagParts<'src>>), ParseError> {
        ensure_sufficient_stack(|| {
            let mut nodes = Vec::new();
            while let Some(fragment) = parser.next_fragment() {
                match fragment.kind {
                    FragmentKind::Text => nodes.push(Node::Text(fragment.text.to_owned())),
                    FragmentKind::Object => {
                        let mut cursor = parser.cursor(fragment.text, fragment.span.start)?;
                        let variable = Variable::parse(&mut cursor)?;
                        cursor.expect_end()?;
                        nodes.push(Node::Object(variable));
                    }
                    FragmentKind::Tag => {
                        let tag = fragment.tag_parts();
                        if let Some(definition) = parser.tags().get(tag.name) {
                            debug!(tag = tag.name, "dispatching tag");
                            nodes.push(definition.parse(tag, parser)?);
                        } else {
                            handler.handle(Some(&tag))?;
                            return Ok((BlockBody { nodes }, Some(tag)));
                        }
                    }
                }
            }
            handler.handle(None)?;
            Ok((BlockBody { nodes }, None))
        })
    }

    /// Render every node in order, stopping as soon as an interrupt is
    /// raised. The interrupt is left set for the enclosing loop.
    pub fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        ensure_sufficient_stack(|| {
            for node in &self.nodes {
                node.render(context, out)?;
                if context.has_interrupt() {
                    break;
                }
            }
            Ok(())
        })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Decides what an unregistered tag name, or the end of input (`None`),
/// means for the body being parsed. `Ok` ends the body.
pub trait UnknownTagHandler {
    fn handle(&self, tag: Option<&TagParts<'_>>) -> Result<(), ParseError>;
}

/// Handler for the template root.
pub struct TopLevel;

impl UnknownTagHandler for TopLevel {
    fn handle(&self, tag: Option<&TagParts<'_>>) -> Result<(), ParseError> {
        match tag {
            None => Ok(()),
            Some(tag) => Err(unknown_tag(tag.name, Some(tag.span()))),
        }
    }
}

/// Handler for the body of a block tag.
pub struct BlockEnd<'a> {
    pub tag: &'a str,
    /// Keywords that end this body and start the next section of the block.
    pub continuations: &'a [&'a str],
    /// Span of the opening tag's markup.
    pub opened_at: Span,
}

impl UnknownTagHandler for BlockEnd<'_> {
    fn handle(&self, tag: Option<&TagParts<'_>>) -> Result<(), ParseError> {
        match tag {
            None => Err(unterminated_tag(self.tag, Some(self.opened_at))),
            Some(found) if found.name.strip_prefix("end") == Some(self.tag) => Ok(()),
            Some(found) if self.continuations.contains(&found.name) => Ok(()),
            Some(_) => TopLevel.handle(tag),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests;
