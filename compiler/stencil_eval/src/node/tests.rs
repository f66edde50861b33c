use super::*;
use crate::test_helpers::{compile, render, render_body, render_with, root};
use crate::{FilterRegistry, TagDefinition, TagRegistry};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use stencil_lexer::LexMode;
use stencil_parse::{Expression, ParseErrorKind};
use stencil_value::Data;

/// `{% shout expr %}` renders the value upper-cased.
#[derive(Debug)]
struct Shout(Expression);

impl CustomTag for Shout {
    fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        out.push_str(&self.0.evaluate(context.data()).to_string().to_uppercase());
        Ok(())
    }
}

struct ShoutTag;

impl TagDefinition for ShoutTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut cursor = parser.tag_cursor(&tag)?;
        let expression = Expression::parse(&mut cursor)?;
        cursor.expect_end()?;
        Ok(Node::Custom(Box::new(Shout(expression))))
    }
}

#[test]
fn text_and_objects() {
    let body = compile("Hello {{ name }}!").unwrap();
    assert_eq!(body.nodes.len(), 3);
    assert!(matches!(&body.nodes[0], Node::Text(text) if text == "Hello "));
    assert!(matches!(&body.nodes[1], Node::Object(_)));

    let mut data = root([("name", Data::from("world"))]);
    assert_eq!(render_body(&body, &mut data).unwrap(), "Hello world!");
}

#[test]
fn empty_template() {
    let body = compile("").unwrap();
    assert!(body.is_empty());
    assert_eq!(render(""), "");
}

#[test]
fn trailing_object_tokens_are_rejected() {
    let err = compile("{{ a b }}").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
}

#[test]
fn unknown_tag_reports_name_and_span() {
    let source = "ab{% frobnicate x %}";
    let err = compile(source).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownTag {
            name: "frobnicate".into()
        }
    );
    let span = err.span.unwrap();
    assert_eq!(&source[span.start..span.end], " x ");
}

#[test]
fn stray_end_tag_at_top_level() {
    let err = compile("{% endif %}").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownTag {
            name: "endif".into()
        }
    );
}

#[test]
fn block_end_accepts_end_and_continuations() {
    let handler = BlockEnd {
        tag: "if",
        continuations: &["else"],
        opened_at: Span::new(0, 2),
    };
    let tag = |name| TagParts {
        name,
        markup: name,
        markup_offset: 10,
    };
    assert!(handler.handle(Some(&tag("endif"))).is_ok());
    assert!(handler.handle(Some(&tag("else"))).is_ok());
    assert!(handler.handle(Some(&tag("when"))).is_err());

    let err = handler.handle(None).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedTag { tag: "if".into() });
    assert_eq!(err.span, Some(Span::new(0, 2)));
}

#[test]
fn render_stops_at_interrupt() {
    let body = compile("a{% continue %}b").unwrap();
    let filters = FilterRegistry::new();
    let mut data = Data::hash();
    let mut context = Context::new(&mut data, &filters);
    let mut out = String::new();
    body.render(&mut context, &mut out).unwrap();
    assert_eq!(out, "a");
    assert_eq!(context.interrupt(), Some(crate::Interrupt::Continue));
}

#[test]
fn custom_tag() {
    let mut tags = TagRegistry::standard();
    tags.register("shout", Arc::new(ShoutTag));
    let body = TemplateParser::new("{% shout who %}!", &tags, LexMode::Strict)
        .unwrap()
        .parse_document()
        .unwrap();
    let mut data = root([("who", Data::from("bob"))]);
    assert_eq!(render_body(&body, &mut data).unwrap(), "BOB!");

    assert!(compile("{% shout who %}").is_err());
}

#[test]
fn render_is_repeatable() {
    let body = compile("{% increment n %}{% cycle 'a', 'b' %}").unwrap();
    let mut data = Data::hash();
    assert_eq!(render_body(&body, &mut data).unwrap(), "0a");
    assert_eq!(render_body(&body, &mut data).unwrap(), "0a");
}

#[test]
fn deep_nesting() {
    let depth = 2_000;
    let source = format!(
        "{}x{}",
        "{% if true %}".repeat(depth),
        "{% endif %}".repeat(depth)
    );
    assert_eq!(render_with(&source, &mut Data::hash()), "x");
}
