//! Small tags: counters, `ifchanged`, `comment`, `raw`, `break`, `continue`.

use crate::{Interrupt, Node, TagDefinition, TemplateParser};
use stencil_lexer::{FragmentKind, TagParts, TokenKind};
use stencil_parse::{syntax_error, unterminated_tag, ParseError};

/// `increment` (`step` 1) and `decrement` (`step` -1).
pub struct CounterTag {
    pub step: i8,
}

impl TagDefinition for CounterTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut cursor = parser.tag_cursor(&tag)?;
        let name = cursor.expect(TokenKind::Identifier)?.text.to_owned();
        cursor.expect_end()?;
        Ok(if self.step > 0 {
            Node::Increment(name)
        } else {
            Node::Decrement(name)
        })
    }
}

pub struct IfchangedTag;

impl TagDefinition for IfchangedTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let (body, _) = parser.parse_block(tag.name, &[], tag.span())?;
        Ok(Node::Ifchanged(body))
    }
}

/// Collect the fragments up to the first `{% end<name> %}` without parsing
/// them, calling `keep` on each one's source text.
fn skip_until_end<'src>(
    tag: &TagParts<'src>,
    parser: &mut TemplateParser<'src, '_>,
    mut keep: impl FnMut(&str),
) -> Result<(), ParseError> {
    while let Some(fragment) = parser.next_fragment() {
        if fragment.kind == FragmentKind::Tag
            && fragment.tag_parts().name.strip_prefix("end") == Some(tag.name)
        {
            return Ok(());
        }
        match fragment.kind {
            FragmentKind::Text => keep(fragment.text),
            FragmentKind::Object | FragmentKind::Tag => keep(&fragment.source_text()),
        }
    }
    Err(unterminated_tag(tag.name, Some(tag.span())))
}

/// Discards its body unparsed.
pub struct CommentTag;

impl TagDefinition for CommentTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        skip_until_end(&tag, parser, |_| {})?;
        Ok(Node::Comment)
    }
}

/// Emits its body verbatim, delimiters included.
pub struct RawTag;

impl TagDefinition for RawTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut text = String::new();
        skip_until_end(&tag, parser, |piece| text.push_str(piece))?;
        Ok(Node::Text(text))
    }
}

/// `break` / `continue`.
pub struct InterruptTag(pub Interrupt);

impl TagDefinition for InterruptTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        _parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        if !tag.markup.trim().is_empty() {
            return Err(syntax_error(
                format!("`{}` takes no arguments", tag.name),
                Some(tag.span()),
            ));
        }
        Ok(match self.0 {
            Interrupt::Break => Node::Break,
            Interrupt::Continue => Node::Continue,
        })
    }
}
