use super::*;
use crate::LexMode;
use pretty_assertions::assert_eq;
use stencil_eval::{RenderError, RenderErrorKind};
use stencil_parse::ParseErrorKind;

#[test]
fn template_keeps_its_source() {
    let engine = Engine::default();
    let template = engine.compile("a{{ b }}c").unwrap();
    assert_eq!(template.source(), "a{{ b }}c");
    assert_eq!(template.body().nodes.len(), 3);
}

#[test]
fn empty_config_knows_no_tags_or_filters() {
    let engine = Engine::new(Config::empty());
    assert_eq!(
        engine.render_empty(&engine.compile("x{{ 1 }}").unwrap()).unwrap(),
        "x1"
    );

    let err = engine.compile("{% if true %}{% endif %}").unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Parse(ref e) if e.kind == ParseErrorKind::UnknownTag { name: "if".into() }
    ));

    let template = engine.compile("{{ 'a' | upcase }}").unwrap();
    let err = engine.render_empty(&template).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Render(ref e) if e.kind == RenderErrorKind::UnknownFilter { name: "upcase".into() }
    ));
}

#[test]
fn lex_mode_is_honoured() {
    let strict = Engine::default();
    let err = strict.compile("{{ a # b }}").unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Parse(ref e) if matches!(e.kind, ParseErrorKind::UnexpectedCharacter { .. })
    ));

    let lax = Engine::new(Config::default().with_lex_mode(LexMode::Lax));
    let mut data = Data::hash();
    data.set("a", Data::from("ok")).unwrap();
    assert_eq!(lax.parse_and_render("{{ a # }}", &mut data).unwrap(), "ok");
}

#[test]
fn config_mut_registers_after_construction() {
    let mut engine = Engine::default();
    engine
        .config_mut()
        .filters
        .register("twice", |input: &Data, _: &[Data]| {
            Ok::<_, RenderError>(Data::from(format!("{input}{input}")))
        });
    assert_eq!(
        engine.parse_and_render("{{ 'ab' | twice }}", &mut Data::hash()).unwrap(),
        "abab"
    );
}
