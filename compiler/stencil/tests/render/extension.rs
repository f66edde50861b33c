//! Host-registered tags, filters and drops.

use crate::common::hash;
use pretty_assertions::assert_eq;
use stencil::{
    argument_error, wrong_arg_count, BlockBody, Config, Context, CustomTag, Data, DropObject,
    Engine, Expression, Node, ParseError, RenderError, RenderErrorKind, SharedDrop,
    TagDefinition, TagParts, TemplateError, TemplateParser,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// `{% repeat n %}body{% endrepeat %}`
#[derive(Debug)]
struct Repeat {
    count: Expression,
    body: BlockBody,
}

impl CustomTag for Repeat {
    fn render(&self, context: &mut Context<'_>, out: &mut String) -> Result<(), RenderError> {
        let count = self
            .count
            .evaluate(context.data())
            .to_integer()
            .ok_or_else(|| argument_error("repeat", "count must be an integer"))?;
        for _ in 0..count.max(0) {
            self.body.render(context, out)?;
        }
        Ok(())
    }
}

struct RepeatTag;

impl TagDefinition for RepeatTag {
    fn parse<'src>(
        &self,
        tag: TagParts<'src>,
        parser: &mut TemplateParser<'src, '_>,
    ) -> Result<Node, ParseError> {
        let mut cursor = parser.tag_cursor(&tag)?;
        let count = Expression::parse(&mut cursor)?;
        cursor.expect_end()?;
        let (body, _) = parser.parse_block(tag.name, &[], tag.span())?;
        Ok(Node::Custom(Box::new(Repeat { count, body })))
    }
}

fn truncate(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    let [limit] = args else {
        return Err(wrong_arg_count("truncate", "1", args.len()));
    };
    let limit = limit
        .to_integer()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| argument_error("truncate", "limit must be a non-negative integer"))?;
    Ok(Data::from(input.to_string().chars().take(limit).collect::<String>()))
}

#[test]
fn custom_block_tag() {
    let engine = Engine::new(Config::default().with_tag("repeat", RepeatTag));
    let mut data = hash([("n", Data::Int(3))]);
    assert_eq!(
        engine
            .parse_and_render("{% repeat n %}[{% increment i %}]{% endrepeat %}", &mut data)
            .unwrap(),
        "[0][1][2]"
    );
}

#[test]
fn custom_tag_is_unterminated_without_end() {
    let engine = Engine::new(Config::default().with_tag("repeat", RepeatTag));
    assert!(matches!(
        engine.compile("{% repeat 2 %}body"),
        Err(TemplateError::Parse(_))
    ));
}

#[test]
fn custom_filter_function() {
    let engine = Engine::new(Config::default().with_filter("truncate", truncate));
    let mut data = hash([("title", Data::from("stencil templates"))]);
    assert_eq!(
        engine
            .parse_and_render("{{ title | truncate: 7 | upcase }}", &mut data)
            .unwrap(),
        "STENCIL"
    );

    let err = engine
        .parse_and_render("{{ title | truncate }}", &mut data)
        .unwrap_err();
    let TemplateError::Render(err) = err else {
        panic!("expected a render error");
    };
    assert!(matches!(err.kind, RenderErrorKind::Argument { .. }));
    assert!(err.span.is_some());
}

#[test]
fn filters_can_be_replaced() {
    let engine = Engine::new(Config::default().with_filter(
        "upcase",
        |input: &Data, _: &[Data]| Ok::<_, RenderError>(Data::from(format!("<{input}>"))),
    ));
    assert_eq!(
        engine
            .parse_and_render("{{ 'x' | upcase }}", &mut Data::hash())
            .unwrap(),
        "<x>"
    );
}

/// A record that counts how often its fields are loaded.
#[derive(Debug, Default)]
struct Account {
    loads: AtomicUsize,
}

impl DropObject for Account {
    fn load(&self, key: &str) -> Data {
        self.loads.fetch_add(1, Ordering::Relaxed);
        match key {
            "owner" => Data::from("ada"),
            "balance" => Data::Int(42),
            _ => Data::Nil,
        }
    }
}

#[test]
fn drops_load_lazily() {
    let account = Arc::new(Account::default());
    let mut data = hash([(
        "account",
        Data::Drop(SharedDrop::from_arc(account.clone())),
    )]);
    let out = Engine::default()
        .parse_and_render(
            "{{ account.owner }}:{% if account.balance > 10 %}rich{% endif %}[{{ account.missing }}][{{ account }}]",
            &mut data,
        )
        .unwrap();
    assert_eq!(out, "ada:rich[][]");
    assert!(account.loads.load(Ordering::Relaxed) >= 3);
}
