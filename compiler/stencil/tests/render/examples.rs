//! The documented rendering examples, end to end.

use crate::common::{hash, ints, render, render_with};
use pretty_assertions::assert_eq;
use stencil::{Data, Hash, SharedDrop};

#[derive(Debug)]
struct Empty;

impl stencil::DropObject for Empty {
    fn load(&self, _key: &str) -> Data {
        Data::Nil
    }
}

#[test]
fn truthiness_laws() {
    let values = [
        Data::Nil,
        Data::Bool(false),
        Data::Bool(true),
        Data::Int(0),
        Data::Float(0.0),
        Data::from(""),
        Data::Array(Vec::new()),
        Data::Hash(Hash::new()),
        Data::Drop(SharedDrop::new(Empty)),
    ];
    for value in &values {
        assert_eq!(value.to_bool(), matches!(value, Data::Bool(true)), "{value:?}");
        assert_eq!(
            value.is_truthy(),
            !matches!(value, Data::Nil | Data::Bool(false)),
            "{value:?}"
        );
    }
}

#[test]
fn out_of_range_index_is_nil() {
    let items = ints(&[1, 2, 3]);
    assert_eq!(items.at(3), &Data::Nil);
    assert_eq!(items.at(-1), &Data::Nil);
    assert_eq!(items.at(i64::MAX), &Data::Nil);

    let mut data = hash([("items", items)]);
    assert_eq!(render_with("[{{ items[7] }}{{ items.9 }}]", &mut data), "[]");
}

#[test]
fn append_filter() {
    assert_eq!(render(r#"{{ "hello " | append: "world" }}"#), "hello world");
    assert_eq!(render(r#"{{ 32 | append: "world" }}"#), "32world");
}

#[test]
fn range_with_limit_and_offset() {
    assert_eq!(
        render("{%for i in (0..9) limit:4 offset:2%}{{i}}{%endfor%}"),
        "2345"
    );
}

#[test]
fn reversed_range() {
    assert_eq!(render("{%for item in (1..3) reversed%}{{item}}{%endfor%}"), "321");
}

#[test]
fn break_inside_if() {
    let mut data = hash([("items", ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]))]);
    assert_eq!(
        render_with(
            "{% for i in items %}{{i}}{% if i > 3 %}{% break %}{% endif %}{% endfor %}",
            &mut data
        ),
        "1234"
    );
}

#[test]
fn parentloop() {
    let mut data = hash([(
        "outer",
        Data::Array(vec![ints(&[1, 1, 1]), ints(&[1, 1, 1])]),
    )]);
    let source = "{% for row in outer %}{% for x in row %}{{forloop.parentloop.index}}.{{forloop.index}} {% endfor %}{% endfor %}";
    assert_eq!(render_with(source, &mut data), "1.1 1.2 1.3 2.1 2.2 2.3 ");

    let source = "{% for row in outer %}{% if forloop.parentloop == nil %}-{% endif %}{% endfor %}";
    assert_eq!(render_with(source, &mut data), "--");
}

#[test]
fn cycle_at_one_call_site() {
    assert_eq!(
        render("{% for i in (1..3) %}{%cycle 'one','two'%}{% endfor %}"),
        "onetwoone"
    );
}

#[test]
fn a_small_page() {
    let mut data = hash([
        ("title", Data::from("groceries")),
        (
            "items",
            Data::Array(vec![
                hash([("name", Data::from("milk")), ("qty", Data::Int(2))]),
                hash([("name", Data::from("eggs")), ("qty", Data::Int(12))]),
                hash([("name", Data::from("tea")), ("qty", Data::Int(0))]),
            ]),
        ),
    ]);
    let source = "\
{{ title | capitalize }} ({{ items.size }})
{% for item in items %}{% unless item.qty == 0 %}{{ forloop.index }}. {{ item.name | upcase }} x{{ item.qty }}
{% endunless %}{% endfor %}{% assign total = items.first.qty | plus: items.last.qty %}total: {{ total }}";
    assert_eq!(
        render_with(source, &mut data),
        "Groceries (3)\n1. MILK x2\n2. EGGS x12\ntotal: 2"
    );
}
