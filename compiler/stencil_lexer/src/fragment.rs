//! Fragment scanner.
//!
//! Splits raw template source into an ordered sequence of text, object
//! (`{{ ... }}`) and tag (`{% ... %}`) fragments. The payload of an object
//! or tag fragment is the markup between the delimiters, untrimmed.
//!
//! Opening delimiters are located with `memchr`, closing ones with
//! `memchr::memmem`, so long literal runs are skipped in bulk.

use crate::{LexError, LexErrorKind, Span};
use memchr::memmem;

/// The three kinds of fragment a template is made of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Literal text, rendered verbatim.
    Text,
    /// `{{ markup }}` output.
    Object,
    /// `{% markup %}` control construct.
    Tag,
}

impl FragmentKind {
    /// Opening delimiter for this fragment kind (empty for text).
    pub const fn open(self) -> &'static str {
        match self {
            FragmentKind::Text => "",
            FragmentKind::Object => "{{",
            FragmentKind::Tag => "{%",
        }
    }

    /// Closing delimiter for this fragment kind (empty for text).
    pub const fn close(self) -> &'static str {
        match self {
            FragmentKind::Text => "",
            FragmentKind::Object => "}}",
            FragmentKind::Tag => "%}",
        }
    }
}

/// One lexical unit of template source.
///
/// `text` borrows from the source; `span` locates `text` (not the
/// delimiters) in that source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fragment<'src> {
    pub kind: FragmentKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Fragment<'src> {
    /// Split a tag fragment's markup into its name and the remaining markup.
    ///
    /// The name is the leading run of word characters after optional
    /// whitespace; the rest is returned untrimmed together with its offset
    /// into the source.
    pub fn tag_parts(&self) -> TagParts<'src> {
        let trimmed = self.text.trim_start();
        let lead = self.text.len() - trimmed.len();
        let name_len = trimmed
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        TagParts {
            name: &trimmed[..name_len],
            markup: &trimmed[name_len..],
            markup_offset: self.span.start + lead + name_len,
        }
    }

    /// Reconstruct the fragment exactly as it appeared in the source,
    /// delimiters included.
    pub fn source_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 4);
        out.push_str(self.kind.open());
        out.push_str(self.text);
        out.push_str(self.kind.close());
        out
    }
}

/// Name and markup of a tag fragment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TagParts<'src> {
    pub name: &'src str,
    pub markup: &'src str,
    /// Byte offset of `markup` within the template source.
    pub markup_offset: usize,
}

impl TagParts<'_> {
    /// Source span of the markup after the name.
    pub fn span(&self) -> Span {
        Span::new(self.markup_offset, self.markup_offset + self.markup.len())
    }
}

/// Scan `source` into fragments.
///
/// Empty text runs between adjacent delimiters are not emitted.
pub fn scan(source: &str) -> Result<Vec<Fragment<'_>>, LexError> {
    let bytes = source.as_bytes();
    let mut fragments = Vec::new();
    let mut text_start = 0;
    let mut search = 0;

    while let Some(found) = memchr::memchr(b'{', &bytes[search..]) {
        let open = search + found;
        let kind = match bytes.get(open + 1).copied() {
            Some(b'{') => FragmentKind::Object,
            Some(b'%') => FragmentKind::Tag,
            _ => {
                search = open + 1;
                continue;
            }
        };

        if open > text_start {
            fragments.push(Fragment {
                kind: FragmentKind::Text,
                text: &source[text_start..open],
                span: Span::new(text_start, open),
            });
        }

        let inner = open + 2;
        let Some(len) = memmem::find(&bytes[inner..], kind.close().as_bytes()) else {
            return Err(LexError::new(
                LexErrorKind::UnterminatedDelimiter { open: kind.open() },
                Span::new(open, inner),
            ));
        };
        fragments.push(Fragment {
            kind,
            text: &source[inner..inner + len],
            span: Span::new(inner, inner + len),
        });

        text_start = inner + len + 2;
        search = text_start;
    }

    if text_start < source.len() {
        fragments.push(Fragment {
            kind: FragmentKind::Text,
            text: &source[text_start..],
            span: Span::new(text_start, source.len()),
        });
    }

    tracing::trace!(count = fragments.len(), "scanned fragments");
    Ok(fragments)
}
