use super::{DropObject, SharedDrop};
use crate::Data;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// A record whose `count` field is backed by a counter the test controls.
#[derive(Default)]
struct Counter {
    value: AtomicI64,
    loads: AtomicUsize,
}

impl DropObject for Counter {
    fn load(&self, key: &str) -> Data {
        self.loads.fetch_add(1, Ordering::Relaxed);
        match key {
            "count" => Data::Int(self.value.load(Ordering::Relaxed)),
            "name" => Data::from("counter"),
            _ => Data::Nil,
        }
    }
}

#[test]
fn get_loads_on_every_read() {
    let counter = Arc::new(Counter::default());
    let drop = SharedDrop::from_arc(counter.clone());
    assert_eq!(drop.get("name"), Data::from("counter"));
    assert_eq!(drop.get("name"), Data::from("counter"));
    assert_eq!(counter.loads.load(Ordering::Relaxed), 2);
}

#[test]
fn unknown_key_is_nil() {
    let drop = SharedDrop::new(Counter::default());
    assert_eq!(drop.get("missing"), Data::Nil);
}

#[test]
fn changed_value_replaces_cache_entry() {
    let counter = Arc::new(Counter::default());
    let drop = SharedDrop::from_arc(counter.clone());

    assert_eq!(drop.get("count"), Data::Int(0));
    counter.value.store(5, Ordering::Relaxed);
    assert_eq!(drop.get("count"), Data::Int(5));
    assert_eq!(counter.loads.load(Ordering::Relaxed), 2);

    let twin = SharedDrop::new(Counter::default());
    twin.get("count");
    assert_ne!(drop, twin);
}

#[test]
fn clones_share_the_cache() {
    let drop = SharedDrop::new(Counter::default());
    let copy = drop.clone();
    drop.get("name");
    assert!(copy.ptr_eq(&drop));
    assert_ne!(copy, SharedDrop::new(Counter::default()));
}

#[test]
fn equality_is_cache_content_equality() {
    let a = SharedDrop::new(Counter::default());
    let b = SharedDrop::new(Counter::default());
    assert_eq!(a, b);

    a.get("name");
    assert_ne!(a, b);

    b.get("name");
    assert_eq!(a, b);
}

/// A drop whose member is itself: comparisons must not self-deadlock.
struct Recursive(std::sync::OnceLock<SharedDrop>);

impl DropObject for Recursive {
    fn load(&self, _key: &str) -> Data {
        self.0.get().cloned().map_or(Data::Nil, Data::Drop)
    }
}

#[test]
fn self_referential_drop_does_not_deadlock() {
    let inner = Arc::new(Recursive(std::sync::OnceLock::new()));
    let drop = SharedDrop::from_arc(inner.clone());
    let _ = inner.0.set(drop.clone());

    let first = drop.get("me");
    let second = drop.get("me");
    assert_eq!(first, second);
}
