//! Helpers for compiling and rendering templates in unit tests.

#![allow(clippy::unwrap_used)]

use crate::{BlockBody, Context, FilterRegistry, RenderError, TagRegistry, TemplateParser};
use stencil_lexer::LexMode;
use stencil_parse::ParseError;
use stencil_value::{Data, Hash};

/// Compile with the standard tags in strict mode.
pub fn compile(source: &str) -> Result<BlockBody, ParseError> {
    let tags = TagRegistry::standard();
    TemplateParser::new(source, &tags, LexMode::Strict)?.parse_document()
}

/// Render an already compiled body with the standard filters.
pub fn render_body(body: &BlockBody, data: &mut Data) -> Result<String, RenderError> {
    let filters = FilterRegistry::standard();
    let mut context = Context::new(data, &filters);
    let mut out = String::new();
    body.render(&mut context, &mut out)?;
    Ok(out)
}

/// Compile and render `source` against `data`, panicking on any error.
pub fn render_with(source: &str, data: &mut Data) -> String {
    let body = compile(source).unwrap();
    render_body(&body, data).unwrap()
}

/// Compile and render `source` against an empty hash.
pub fn render(source: &str) -> String {
    render_with(source, &mut Data::hash())
}

/// A hash root built from pairs.
pub fn root<const N: usize>(pairs: [(&str, Data); N]) -> Data {
    Data::Hash(Hash::from_pairs(pairs).unwrap())
}

/// An array of integers.
pub fn ints(values: &[i64]) -> Data {
    Data::Array(values.iter().copied().map(Data::Int).collect())
}
