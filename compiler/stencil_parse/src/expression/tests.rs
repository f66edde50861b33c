use super::{Expression, Lookup, Segment};
use crate::{Cursor, ParseErrorKind};
use pretty_assertions::assert_eq;
use stencil_lexer::LexMode;
use stencil_value::{Data, Hash};

fn parse(markup: &str) -> Expression {
    let mut cursor = Cursor::lex(markup, 0, LexMode::Strict).unwrap();
    let expr = Expression::parse(&mut cursor).unwrap();
    cursor.expect_end().unwrap();
    expr
}

fn key(name: &str) -> Segment {
    Segment::Key(name.to_owned())
}

fn root() -> Data {
    let product = Hash::from_pairs([
        ("title", Data::from("Shoes")),
        (
            "variants",
            Data::from(vec![Data::from("red"), Data::from("blue")]),
        ),
    ])
    .unwrap();
    Data::Hash(
        Hash::from_pairs([
            ("product", Data::Hash(product)),
            ("field", Data::from("title")),
            ("n", Data::Int(1)),
        ])
        .unwrap(),
    )
}

// === Parsing ===

#[test]
fn empty_markup_is_nil() {
    assert_eq!(parse(""), Expression::Nil);
}

#[test]
fn literals() {
    assert_eq!(parse("'hi'"), Expression::String("hi".into()));
    assert_eq!(parse("\"it's\""), Expression::String("it's".into()));
    assert_eq!(parse("-12"), Expression::Int(-12));
    assert_eq!(parse("2.5"), Expression::Float(2.5));
}

#[test]
fn literal_names_collapse() {
    assert_eq!(parse("nil"), Expression::Nil);
    assert_eq!(parse("null"), Expression::Nil);
    assert_eq!(parse("true"), Expression::Bool(true));
    assert_eq!(parse("false"), Expression::Bool(false));
}

#[test]
fn literal_names_inside_chains_stay_lookups() {
    let Expression::Lookup(lookup) = parse("a.true") else {
        panic!("expected lookup");
    };
    assert_eq!(lookup.segments.as_slice(), &[key("a"), key("true")]);
}

#[test]
fn dotted_and_bracketed_chain() {
    let Expression::Lookup(lookup) = parse("product.variants[n].name") else {
        panic!("expected lookup");
    };
    let index = Segment::Index(Box::new(Expression::Lookup(Lookup {
        segments: [key("n")].into_iter().collect(),
    })));
    assert_eq!(
        lookup.segments.as_slice(),
        &[key("product"), key("variants"), index, key("name")]
    );
}

#[test]
fn numeric_path_segments() {
    let Expression::Lookup(lookup) = parse("a.0") else {
        panic!("expected lookup");
    };
    assert_eq!(lookup.segments.as_slice(), &[key("a"), key("0")]);

    let Expression::Lookup(lookup) = parse("a.1.2") else {
        panic!("expected lookup");
    };
    assert_eq!(lookup.segments.as_slice(), &[key("a"), key("1"), key("2")]);
}

#[test]
fn leading_bracket() {
    let Expression::Lookup(lookup) = parse("['product'].title") else {
        panic!("expected lookup");
    };
    assert_eq!(
        lookup.segments.first(),
        Some(&Segment::Index(Box::new(Expression::String("product".into()))))
    );
    assert_eq!(lookup.to_string(), "['product'].title");
}

#[test]
fn unclosed_bracket_is_an_error() {
    let mut cursor = Cursor::lex("a[1", 0, LexMode::Strict).unwrap();
    let err = Expression::parse(&mut cursor).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
}

#[test]
fn oversized_integer_is_an_error() {
    let mut cursor = Cursor::lex("99999999999999999999", 0, LexMode::Strict).unwrap();
    let err = Expression::parse(&mut cursor).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::InvalidNumber {
            text: "99999999999999999999".into()
        }
    );
}

#[test]
fn stops_before_unrelated_tokens() {
    let mut cursor = Cursor::lex("x | upcase", 0, LexMode::Strict).unwrap();
    Expression::parse(&mut cursor).unwrap();
    assert_eq!(cursor.current().text, "|");
}

// === Evaluation ===

#[test]
fn evaluate_literals() {
    let data = root();
    assert_eq!(parse("'a'").evaluate(&data), Data::from("a"));
    assert_eq!(parse("3").evaluate(&data), Data::Int(3));
    assert_eq!(parse("nil").evaluate(&data), Data::Nil);
}

#[test]
fn evaluate_lookups() {
    let data = root();
    assert_eq!(parse("product.title").evaluate(&data), Data::from("Shoes"));
    assert_eq!(parse("product[field]").evaluate(&data), Data::from("Shoes"));
    assert_eq!(parse("product.variants[n]").evaluate(&data), Data::from("blue"));
    assert_eq!(parse("product.variants.first").evaluate(&data), Data::from("red"));
    assert_eq!(parse("product.variants.size").evaluate(&data), Data::Int(2));
}

#[test]
fn failed_lookups_are_nil() {
    let data = root();
    assert_eq!(parse("missing").evaluate(&data), Data::Nil);
    assert_eq!(parse("missing.deeper.still").evaluate(&data), Data::Nil);
    assert_eq!(parse("product.variants[7]").evaluate(&data), Data::Nil);
    assert_eq!(parse("n.x").evaluate(&data), Data::Nil);
}

#[test]
fn textual_form() {
    assert_eq!(parse("'one'").to_string(), "'one'");
    assert_eq!(parse("a.b[0]").to_string(), "a.b[0]");
    assert_eq!(parse("1.0").to_string(), "1.0");
}
