//! Failures as a host sees them.

use crate::common::hash;
use pretty_assertions::assert_eq;
use stencil::{Data, Engine, ParseErrorKind, RenderErrorKind, TemplateError, ValueError};

fn compile_error(source: &str) -> ParseErrorKind {
    match Engine::default().compile(source) {
        Err(TemplateError::Parse(err)) => err.kind,
        other => panic!("expected a syntax error for {source:?}, got {other:?}"),
    }
}

fn render_error(source: &str, data: &mut Data) -> RenderErrorKind {
    let engine = Engine::default();
    let template = engine.compile(source).unwrap();
    match engine.render(&template, data) {
        Err(TemplateError::Render(err)) => err.kind,
        other => panic!("expected a render error for {source:?}, got {other:?}"),
    }
}

#[test]
fn syntax_errors() {
    assert_eq!(
        compile_error("{{ name "),
        ParseErrorKind::UnterminatedDelimiter { open: "{{" }
    );
    assert_eq!(compile_error("{{ 'open }}"), ParseErrorKind::UnterminatedString);
    assert!(matches!(
        compile_error("{% for x %}{% endfor %}"),
        ParseErrorKind::Syntax { .. }
    ));
    assert!(matches!(
        compile_error("{{ a | }}"),
        ParseErrorKind::UnexpectedToken { .. }
    ));
    assert_eq!(
        compile_error("{% for x in xs %}"),
        ParseErrorKind::UnterminatedTag { tag: "for".into() }
    );
    assert_eq!(
        compile_error("{% include 'x' %}"),
        ParseErrorKind::UnknownTag {
            name: "include".into()
        }
    );
}

#[test]
fn syntax_error_location() {
    let source = "line one\n  {% if %}";
    let err = Engine::default().compile(source).unwrap_err();
    let (line, column) = err.line_col(source).unwrap();
    assert_eq!(line, 2);
    assert!(column > 2);
}

#[test]
fn render_errors() {
    assert_eq!(
        render_error("{{ 1 | shout }}", &mut Data::hash()),
        RenderErrorKind::UnknownFilter {
            name: "shout".into()
        }
    );
    assert!(matches!(
        render_error("{{ 'a' | plus: 'b' }}", &mut Data::hash()),
        RenderErrorKind::Argument { .. }
    ));
    assert_eq!(
        render_error("{% assign x = 1 %}", &mut Data::Int(3)),
        RenderErrorKind::Structural(ValueError::NotAHash { type_name: "int" })
    );
}

#[test]
fn missing_data_is_not_an_error() {
    let mut data = hash([("user", hash([("name", Data::from("ada"))]))]);
    let out = Engine::default()
        .parse_and_render(
            "[{{ nobody }}][{{ user.age }}][{{ user.name.first }}][{% if ghost %}x{% endif %}]",
            &mut data,
        )
        .unwrap();
    assert_eq!(out, "[][][][]");
}

#[test]
fn render_error_points_at_the_filter() {
    let source = "ok\n{{ 1 | shout }}";
    let engine = Engine::default();
    let template = engine.compile(source).unwrap();
    let err = engine.render_empty(&template).unwrap_err();
    let (line, _) = err.line_col(source).unwrap();
    assert_eq!(line, 2);
}
