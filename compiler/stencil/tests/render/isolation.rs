//! Renders of one compiled template do not leak state into each other.

use crate::common::hash;
use pretty_assertions::assert_eq;
use stencil::{Data, Engine};
use std::sync::Arc;
use std::thread;

const SOURCE: &str = "{% increment n %}{% cycle 'a', 'b' %}{% ifchanged %}{{ who }}{% endifchanged %}{% for x in (1..2) %}{{ x }}{% endfor %}";

#[test]
fn two_renders_two_roots() {
    let engine = Engine::default();
    let template = engine.compile(SOURCE).unwrap();

    let mut first = hash([("who", Data::from("ann"))]);
    let mut second = hash([("who", Data::from("bo"))]);
    assert_eq!(engine.render(&template, &mut first).unwrap(), "0aann12");
    assert_eq!(engine.render(&template, &mut second).unwrap(), "0abo12");
    assert_eq!(engine.render(&template, &mut first).unwrap(), "0aann12");
}

#[test]
fn assign_writes_only_the_given_root() {
    let engine = Engine::default();
    let template = engine.compile("{% assign seen = true %}{{ seen }}").unwrap();

    let mut first = Data::hash();
    assert_eq!(engine.render(&template, &mut first).unwrap(), "true");
    assert_eq!(first.member("seen").into_owned(), Data::Bool(true));

    let mut second = Data::hash();
    assert_eq!(
        engine.render(&template, &mut second).unwrap(),
        "true"
    );
    let fresh = engine.compile("[{{ seen }}]").unwrap();
    assert_eq!(engine.render_empty(&fresh).unwrap(), "[]");
}

#[test]
fn concurrent_renders_share_a_template() {
    let engine = Arc::new(Engine::default());
    let template = Arc::new(engine.compile(SOURCE).unwrap());

    let handles: Vec<_> = ["x", "y", "z", "w"]
        .into_iter()
        .map(|who| {
            let engine = Arc::clone(&engine);
            let template = Arc::clone(&template);
            thread::spawn(move || {
                let mut data = hash([("who", Data::from(who))]);
                (who, engine.render(&template, &mut data).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (who, out) = handle.join().unwrap();
        assert_eq!(out, format!("0a{who}12"));
    }
}
