//! `for` loops.
//!
//! ```text
//! for := identifier "in" source modifier*
//! source := "(" expression ".." expression ")" | expression
//! modifier := "reversed" | "limit" ":" expression | "offset" ":" expression
//! ```
//!
//! # Windowing
//!
//! The natural sequence is the inclusive integer range, or the collection's
//! items: array elements, `[key, value]` pairs of a hash sorted by key, or
//! a string once. `offset` skips that many items from the natural start and
//! `limit` caps the count; the window is clamped to the natural end. An
//! empty window renders the `else` body instead. `reversed` walks the
//! window after it has been cut from its far end. Ranges are never
//! materialized; each item is produced when its iteration starts.
//!
//! # Loop state
//!
//! Each iteration binds the loop variable and `forloop` in the data root.
//! `forloop.parentloop` links to the enclosing loop through the `for`
//! register. Both bindings are restored when the loop exits.

use crate::error::argument_error;
use crate::{BlockBody, Context, Interrupt, Node, RenderError, TagDefinition, TemplateParser};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stencil_lexer::{TagParts, TokenKind};
use stencil_parse::{syntax_error, Cursor, Expression, ParseError};
use stencil_value::{Data, DropObject, SharedDrop};

const CONTINUATIONS: &[&str] = &["else"];

pub struct ForTag;

#[derive(Debug)]
pub enum LoopSource {
    /// `(start..end)`, inclusive.
    Range(Expression, Expression),
    Collection(Expression),
}

#[derive(Debug)]
pub struct ForNode {
    pub variable: String,
    pub source: LoopSource,
    pub reversed: bool,
    pub offset: Option<Expression>,
    pub limit: Option<Expression>,
    pub body: BlockBody,
    pub else_body: Option<BlockBody>,
}

impl TagDefinition for ForTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut cursor = parser.tag_cursor(&tag)?;
        let variable = cursor.expect(TokenKind::Identifier)?.text.to_owned();
        if cursor.try_consume_id("in").is_none() {
            return Err(syntax_error(
                "expected `in` after the loop variable",
                Some(cursor.current_span()),
            ));
        }
        let source = parse_source(&mut cursor)?;

        let mut reversed = false;
        let mut offset = None;
        let mut limit = None;
        while !cursor.is_at_end() {
            if cursor.try_consume_id("reversed").is_some() {
                reversed = true;
            } else if cursor.look_id("offset") && cursor.look(TokenKind::Colon, 1) {
                cursor.consume();
                cursor.consume();
                offset = Some(Expression::parse(&mut cursor)?);
            } else if cursor.look_id("limit") && cursor.look(TokenKind::Colon, 1) {
                cursor.consume();
                cursor.consume();
                limit = Some(Expression::parse(&mut cursor)?);
            } else {
                return Err(syntax_error(
                    format!("unknown `for` modifier `{}`", cursor.current().text),
                    Some(cursor.current_span()),
                ));
            }
        }

        let (body, end) = parser.parse_block(tag.name, CONTINUATIONS, tag.span())?;
        let else_body = if end.name == "else" {
            let (body, last) = parser.parse_block(tag.name, CONTINUATIONS, end.span())?;
            if last.name == "else" {
                return Err(syntax_error("duplicate `else` in `for`", Some(last.span())));
            }
            Some(body)
        } else {
            None
        };

        Ok(Node::For(ForNode {
            variable,
            source,
            reversed,
            offset,
            limit,
            body,
            else_body,
        }))
    }
}

fn parse_source(cursor: &mut Cursor<'_>) -> Result<LoopSource, ParseError> {
    if cursor.try_consume(TokenKind::OpenRound).is_none() {
        return Expression::parse(cursor).map(LoopSource::Collection);
    }
    let start = Expression::parse(cursor)?;
    cursor.expect(TokenKind::Range)?;
    let end = Expression::parse(cursor)?;
    cursor.expect(TokenKind::CloseRound)?;
    Ok(LoopSource::Range(start, end))
}

/// The values a loop would visit before windowing.
enum Items {
    Range { start: i64, len: usize },
    List(Vec<Data>),
}

impl Items {
    fn len(&self) -> usize {
        match self {
            Items::Range { len, .. } => *len,
            Items::List(items) => items.len(),
        }
    }

    /// Move out the item at `pos`. Range items are computed on demand.
    fn take(&mut self, pos: usize) -> Data {
        match self {
            Items::Range { start, .. } => u64::try_from(pos)
                .ok()
                .and_then(|pos| start.checked_add_unsigned(pos))
                .map_or(Data::Nil, Data::Int),
            Items::List(items) => items.get_mut(pos).map(std::mem::take).unwrap_or_default(),
        }
    }
}

impl ForNode {
    fn items(&self, root: &Data) -> Result<Items, RenderError> {
        match &self.source {
            LoopSource::Range(start, end) => {
                let start = range_bound(start.evaluate(root))?;
                let end = range_bound(end.evaluate(root))?;
                let len = if end < start {
                    0
                } else {
                    usize::try_from(end.abs_diff(start))
                        .map_or(usize::MAX, |n| n.saturating_add(1))
                };
                Ok(Items::Range { start, len })
            }
            LoopSource::Collection(expr) => Ok(Items::List(match expr.evaluate(root) {
                Data::Array(items) => items,
                Data::Hash(hash) => hash
                    .sorted()
                    .into_iter()
                    .map(|(key, value)| {
                        Data::Array(vec![Data::from(key.as_str()), value.clone()])
                    })
                    .collect(),
                text @ Data::String(_) => vec![text],
                _ => Vec::new(),
            })),
        }
    }

    /// Evaluate `offset`/`limit`; nil counts as absent, negatives as zero.
    fn modifier(
        expr: Option<&Expression>,
        root: &Data,
        name: &str,
    ) -> Result<Option<usize>, RenderError> {
        let Some(expr) = expr else {
            return Ok(None);
        };
        match expr.evaluate(root) {
            Data::Nil => Ok(None),
            value => value
                .to_integer()
                .map(|n| Some(usize::try_from(n).unwrap_or(0)))
                .ok_or_else(|| {
                    let found = value.type_name();
                    argument_error("for", format!("`{name}` must be a number, got {found}"))
                }),
        }
    }

    pub fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        let root = context.data();
        let mut items = self.items(root)?;
        let offset = Self::modifier(self.offset.as_ref(), root, "offset")?;
        let limit = Self::modifier(self.limit.as_ref(), root, "limit")?;

        let natural = items.len();
        let from = offset.unwrap_or(0).min(natural);
        let to = limit.map_or(natural, |limit| from.saturating_add(limit).min(natural));
        let length = to - from;

        if length == 0 {
            return match &self.else_body {
                Some(body) => body.render(context, out),
                None => Ok(()),
            };
        }

        let state = Arc::new(ForloopDrop {
            length,
            index: AtomicUsize::new(0),
            parent: context.current_forloop(),
        });
        let forloop = SharedDrop::from_arc(state.clone());
        let mut scope = context.loop_scope(&self.variable, forloop.clone());

        for index in 0..length {
            let pos = if self.reversed { to - 1 - index } else { from + index };
            state.index.store(index, Ordering::Relaxed);
            scope.assign(&self.variable, items.take(pos))?;
            scope.assign("forloop", Data::Drop(forloop.clone()))?;
            self.body.render(&mut scope, out)?;
            if scope.take_interrupt() == Some(Interrupt::Break) {
                break;
            }
        }
        Ok(())
    }
}

fn range_bound(value: Data) -> Result<i64, RenderError> {
    value.to_integer().ok_or_else(|| {
        argument_error(
            "for",
            format!("range bounds must be integers, got {}", value.type_name()),
        )
    })
}

/// The `forloop` object of one running loop.
#[derive(Debug)]
struct ForloopDrop {
    length: usize,
    /// Zero-based index of the current iteration.
    index: AtomicUsize,
    parent: Option<SharedDrop>,
}

impl DropObject for ForloopDrop {
    fn load(&self, key: &str) -> Data {
        let index = self.index.load(Ordering::Relaxed);
        let remaining = self.length.saturating_sub(index);
        match key {
            "length" => Data::from(self.length),
            "index" => Data::from(index + 1),
            "index0" => Data::from(index),
            "rindex" => Data::from(remaining),
            "rindex0" => Data::from(remaining.saturating_sub(1)),
            "first" => Data::Bool(index == 0),
            "last" => Data::Bool(index + 1 == self.length),
            "parentloop" => self.parent.clone().map_or(Data::Nil, Data::Drop),
            _ => Data::Nil,
        }
    }
}
