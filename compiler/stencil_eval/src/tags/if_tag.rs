//! `if` / `unless` with `elsif` and `else`.

use super::condition::Condition;
use crate::{BlockBody, Context, Node, RenderError, TagDefinition, TemplateParser};
use stencil_lexer::TagParts;
use stencil_parse::{syntax_error, ParseError};

const CONTINUATIONS: &[&str] = &["elsif", "else"];

/// Definition for `if`, and for `unless` when `negate` is set.
pub struct IfTag {
    pub negate: bool,
}

/// One `if`/`elsif` section.
#[derive(Debug)]
pub struct Branch {
    pub condition: Condition,
    pub body: BlockBody,
}

/// First-match-wins conditional.
#[derive(Debug)]
pub struct IfNode {
    pub branches: Vec<Branch>,
    pub else_body: Option<BlockBody>,
    /// `unless`: the first condition is negated.
    pub negate: bool,
}

fn condition<'src>(
    parser: &TemplateParser<'src, '_>,
    tag: &TagParts<'src>,
) -> Result<Condition, ParseError> {
    let mut cursor = parser.tag_cursor(tag)?;
    Condition::parse(&mut cursor).map_err(|err| err.or_span(tag.span()))
}

impl TagDefinition for IfTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut branches = Vec::new();
        let mut current = condition(parser, &tag)?;
        let mut opened_at = tag.span();

        let else_body = loop {
            let (body, end) = parser.parse_block(tag.name, CONTINUATIONS, opened_at)?;
            branches.push(Branch {
                condition: current,
                body,
            });
            match end.name {
                "elsif" => {
                    current = condition(parser, &end)?;
                    opened_at = end.span();
                }
                "else" => {
                    let (body, last) = parser.parse_block(tag.name, CONTINUATIONS, end.span())?;
                    if CONTINUATIONS.contains(&last.name) {
                        return Err(syntax_error(
                            format!("`{}` after `else` in `{}`", last.name, tag.name),
                            Some(last.span()),
                        ));
                    }
                    break Some(body);
                }
                _ => break None,
            }
        };

        Ok(Node::If(IfNode {
            branches,
            else_body,
            negate: self.negate,
        }))
    }
}

impl IfNode {
    pub fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        for (i, branch) in self.branches.iter().enumerate() {
            let holds = branch.condition.evaluate(context.data());
            if holds != (i == 0 && self.negate) {
                return branch.body.render(context, out);
            }
        }
        match &self.else_body {
            Some(body) => body.render(context, out),
            None => Ok(()),
        }
    }
}
