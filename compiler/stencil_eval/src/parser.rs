//! Template parser state: the fragment stream and the compile configuration.

use crate::node::{BlockBody, BlockEnd, TopLevel};
use crate::TagRegistry;
use stencil_lexer::{scan, Fragment, LexMode, Span, TagParts};
use stencil_parse::{Cursor, ParseError};

/// Fragments of one template, consumed in order while the node tree is
/// built. Not restartable.
pub struct TemplateParser<'src, 'cfg> {
    fragments: std::vec::IntoIter<Fragment<'src>>,
    tags: &'cfg TagRegistry,
    lex_mode: LexMode,
}

impl<'src, 'cfg> TemplateParser<'src, 'cfg> {
    /// Scan `source` into fragments. Scanner errors abort here.
    pub fn new(
        source: &'src str,
        tags: &'cfg TagRegistry,
        lex_mode: LexMode,
    ) -> Result<Self, ParseError> {
        let fragments = scan(source)?;
        Ok(TemplateParser {
            fragments: fragments.into_iter(),
            tags,
            lex_mode,
        })
    }

    /// Parse the whole template into its root body.
    pub fn parse_document(&mut self) -> Result<BlockBody, ParseError> {
        let (body, _) = BlockBody::parse(self, &TopLevel)?;
        Ok(body)
    }

    /// Parse a block tag's body up to `end<tag>` or one of `continuations`.
    ///
    /// Returns the body and the tag that ended it; `opened_at` locates the
    /// opening tag for the unterminated-tag error.
    pub fn parse_block(
        &mut self,
        tag: &str,
        continuations: &[&str],
        opened_at: Span,
    ) -> Result<(BlockBody, TagParts<'src>), ParseError> {
        let handler = BlockEnd {
            tag,
            continuations,
            opened_at,
        };
        let (body, end) = BlockBody::parse(self, &handler)?;
        // The block handler rejects end of input, so a body always ends on a tag.
        end.map(|end| (body, end))
            .ok_or_else(|| stencil_parse::unterminated_tag(tag, Some(opened_at)))
    }

    /// Next raw fragment, for tags that consume their body unparsed.
    pub fn next_fragment(&mut self) -> Option<Fragment<'src>> {
        self.fragments.next()
    }

    /// Lex a piece of tag or object markup found at byte `offset`.
    pub fn cursor(&self, markup: &'src str, offset: usize) -> Result<Cursor<'src>, ParseError> {
        Cursor::lex(markup, offset, self.lex_mode)
    }

    /// Lex a tag's markup.
    pub fn tag_cursor(&self, tag: &TagParts<'src>) -> Result<Cursor<'src>, ParseError> {
        self.cursor(tag.markup, tag.markup_offset)
    }

    pub fn tags(&self) -> &'cfg TagRegistry {
        self.tags
    }
}
