//! `cycle`: round-robin over its arguments.
//!
//! Call sites are told apart by the textual form of their unevaluated
//! arguments, or by the rendered group name in
//! `{% cycle 'group': 'a', 'b' %}`. Rotation indices for unnamed sites live
//! in the `cycle` register and those for named groups in `cycle:group`, so a
//! group name never collides with a call site's text.

use crate::{Context, Node, RenderError, TagDefinition, TemplateParser};
use std::fmt::Write;
use stencil_lexer::{TagParts, TokenKind};
use stencil_parse::{syntax_error, Expression, ParseError};
use stencil_value::{Data, Hash};

const SITE_REGISTER: &str = "cycle";
const GROUP_REGISTER: &str = "cycle:group";

pub struct CycleTag;

#[derive(Debug)]
pub struct CycleNode {
    pub group: Option<Expression>,
    pub values: Vec<Expression>,
    /// Identity of an unnamed call site.
    pub key: String,
}

impl TagDefinition for CycleTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut cursor = parser.tag_cursor(&tag)?;
        if cursor.is_at_end() {
            return Err(syntax_error("`cycle` needs at least one value", Some(tag.span())));
        }

        let first = Expression::parse(&mut cursor)?;
        let (group, mut values) = if cursor.try_consume(TokenKind::Colon).is_some() {
            (Some(first), vec![Expression::parse(&mut cursor)?])
        } else {
            (None, vec![first])
        };
        while cursor.try_consume(TokenKind::Comma).is_some() {
            values.push(Expression::parse(&mut cursor)?);
        }
        cursor.expect_end()?;

        let key = values.iter().fold(String::new(), |mut key, value| {
            let _ = write!(key, "{value}");
            key
        });
        Ok(Node::Cycle(CycleNode { group, values, key }))
    }
}

impl CycleNode {
    pub fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        let (register, key) = match &self.group {
            Some(group) => (GROUP_REGISTER, group.evaluate(context.data()).to_string()),
            None => (SITE_REGISTER, self.key.clone()),
        };
        let len = self.values.len();
        let index = match context.register(register) {
            Data::Hash(positions) => {
                let index = positions
                    .get(&key)
                    .and_then(Data::to_integer)
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(0)
                    % len;
                positions.set(key, Data::from((index + 1) % len));
                index
            }
            slot => {
                let mut positions = Hash::new();
                positions.set(key, Data::from(1 % len));
                *slot = Data::Hash(positions);
                0
            }
        };

        let value = self.values[index].evaluate(context.data());
        let _ = write!(out, "{value}");
        Ok(())
    }
}
