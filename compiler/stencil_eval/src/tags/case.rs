//! `case` / `when` / `else`.
//!
//! The subject is evaluated once. Every `when` whose alternatives contain a
//! value equal to the subject renders, in order; `else` renders only when
//! no `when` matched and must come last. A raised interrupt stops the scan.

use crate::{BlockBody, Context, Node, RenderError, TagDefinition, TemplateParser};
use smallvec::SmallVec;
use stencil_lexer::{TagParts, TokenKind};
use stencil_parse::{syntax_error, Expression, ParseError};

const CONTINUATIONS: &[&str] = &["when", "else"];

pub struct CaseTag;

/// One `when` clause: a disjunction of values.
#[derive(Debug)]
pub struct When {
    pub values: SmallVec<[Expression; 2]>,
    pub body: BlockBody,
}

#[derive(Debug)]
pub struct CaseNode {
    pub subject: Expression,
    pub whens: Vec<When>,
    pub else_body: Option<BlockBody>,
}

fn when_values<'src>(
    parser: &TemplateParser<'src, '_>,
    tag: &TagParts<'src>,
) -> Result<SmallVec<[Expression; 2]>, ParseError> {
    let mut cursor = parser.tag_cursor(tag)?;
    if cursor.is_at_end() {
        return Err(syntax_error("`when` needs a value", Some(tag.span())));
    }
    let mut values = SmallVec::new();
    loop {
        values.push(Expression::parse(&mut cursor)?);
        if cursor.try_consume(TokenKind::Comma).is_none() && cursor.try_consume_id("or").is_none()
        {
            break;
        }
    }
    cursor.expect_end()?;
    Ok(values)
}

impl TagDefinition for CaseTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut cursor = parser.tag_cursor(&tag)?;
        let subject = Expression::parse(&mut cursor)?;
        cursor.expect_end()?;

        // Anything between `case` and the first `when` is discarded.
        let (_, mut end) = parser.parse_block(tag.name, CONTINUATIONS, tag.span())?;
        let mut whens = Vec::new();
        let mut else_body = None;

        while end.name == "when" {
            let values = when_values(parser, &end)?;
            let (body, next) = parser.parse_block(tag.name, CONTINUATIONS, end.span())?;
            whens.push(When { values, body });
            end = next;
        }
        if end.name == "else" {
            let (body, next) = parser.parse_block(tag.name, CONTINUATIONS, end.span())?;
            if CONTINUATIONS.contains(&next.name) {
                return Err(syntax_error(
                    format!("`{}` after `else` in `case`", next.name),
                    Some(next.span()),
                ));
            }
            else_body = Some(body);
        }

        Ok(Node::Case(CaseNode {
            subject,
            whens,
            else_body,
        }))
    }
}

impl CaseNode {
    pub fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        let subject = self.subject.evaluate(context.data());
        let mut matched = false;
        for when in &self.whens {
            let hit = when
                .values
                .iter()
                .any(|value| value.evaluate(context.data()) == subject);
            if hit {
                matched = true;
                when.body.render(context, out)?;
                if context.has_interrupt() {
                    return Ok(());
                }
            }
        }
        match &self.else_body {
            Some(body) if !matched => body.render(context, out),
            _ => Ok(()),
        }
    }
}
