//! `assign` and `capture`: write into the data root, emit nothing.

use crate::{BlockBody, Context, Node, RenderError, TagDefinition, TemplateParser, Variable};
use stencil_lexer::{TagParts, TokenKind};
use stencil_parse::{syntax_error, Cursor, ParseError};
use stencil_value::Data;

pub struct AssignTag;

/// `{% assign name = variable %}`
#[derive(Debug)]
pub struct AssignNode {
    pub name: String,
    pub value: Variable,
}

/// A single identifier (or quoted name) followed by nothing.
fn target_name(mut cursor: Cursor<'_>, tag: &str) -> Result<String, ParseError> {
    let name = match cursor.try_consume(TokenKind::String) {
        Some(quoted) => quoted.unquoted().to_owned(),
        None => cursor
            .try_consume(TokenKind::Identifier)
            .map(|token| token.text.to_owned())
            .ok_or_else(|| {
                syntax_error(
                    format!("`{tag}` needs a variable name"),
                    Some(cursor.current_span()),
                )
            })?,
    };
    cursor.expect_end()?;
    Ok(name)
}

impl TagDefinition for AssignTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let Some(eq) = tag.markup.find('=') else {
            return Err(syntax_error(
                "expected `name = value` in `assign`",
                Some(tag.span()),
            ));
        };
        let (target, rest) = (&tag.markup[..eq], &tag.markup[eq + 1..]);

        let name = target_name(parser.cursor(target, tag.markup_offset)?, tag.name)?;
        let mut cursor = parser.cursor(rest, tag.markup_offset + eq + 1)?;
        let value = Variable::parse(&mut cursor)?;
        cursor.expect_end()?;
        Ok(Node::Assign(AssignNode { name, value }))
    }
}

impl AssignNode {
    pub fn render(&self, context: &mut Context<'_>) -> Result<(), RenderError> {
        let value = self.value.evaluate(context)?;
        context.assign(&self.name, value)
    }
}

pub struct CaptureTag;

/// `{% capture name %}body{% endcapture %}`
#[derive(Debug)]
pub struct CaptureNode {
    pub name: String,
    pub body: BlockBody,
}

impl TagDefinition for CaptureTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let name = target_name(parser.tag_cursor(&tag)?, tag.name)?;
        let (body, _) = parser.parse_block(tag.name, &[], tag.span())?;
        Ok(Node::Capture(CaptureNode { name, body }))
    }
}

impl CaptureNode {
    pub fn render(&self, context: &mut Context<'_>) -> Result<(), RenderError> {
        let mut captured = String::new();
        self.body.render(context, &mut captured)?;
        context.assign(&self.name, Data::String(captured))
    }
}
