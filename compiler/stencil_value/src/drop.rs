//! Drops: lazily loaded external objects.
//!
//! A host exposes a record to templates by implementing [`DropObject`]. The
//! engine never enumerates a drop; it only asks for one key at a time.
//!
//! Every [`SharedDrop`] keeps a read-cache of the last value returned for
//! each key. A read whose freshly loaded value equals the cached one
//! returns the cached entry; a changed value replaces it. Two drops are
//! equal when their caches hold equal contents.
//!
//! # Locking
//!
//! The cache sits behind a `parking_lot::Mutex`, so drops are `Send + Sync`.
//! The lock is never held across a call to `load` or across a comparison,
//! which keeps drops that return other drops (or themselves) deadlock-free.

use crate::Data;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Capability implemented by host objects exposed to templates.
pub trait DropObject: Send + Sync {
    /// Produce the value for `key`. Unknown keys should return `Data::Nil`.
    fn load(&self, key: &str) -> Data;
}

struct DropCell {
    object: Arc<dyn DropObject>,
    cache: Mutex<FxHashMap<String, Data>>,
}

/// A shared handle to a drop and its read-cache.
///
/// Cloning is cheap and shares both the object and the cache.
#[derive(Clone)]
pub struct SharedDrop(Arc<DropCell>);

impl SharedDrop {
    pub fn new<D: DropObject + 'static>(object: D) -> Self {
        Self::from_arc(Arc::new(object))
    }

    /// Wrap an object the host keeps its own handle to.
    pub fn from_arc(object: Arc<dyn DropObject>) -> Self {
        SharedDrop(Arc::new(DropCell {
            object,
            cache: Mutex::new(FxHashMap::default()),
        }))
    }

    /// Read `key` through the cache.
    pub fn get(&self, key: &str) -> Data {
        let loaded = self.0.object.load(key);
        let cached = self.0.cache.lock().get(key).cloned();
        if let Some(cached) = cached {
            if cached == loaded {
                return cached;
            }
        }
        self.0.cache.lock().insert(key.to_owned(), loaded.clone());
        loaded
    }

    /// Whether two handles refer to the same drop instance.
    #[inline]
    pub fn ptr_eq(&self, other: &SharedDrop) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn snapshot(&self) -> FxHashMap<String, Data> {
        self.0.cache.lock().clone()
    }
}

impl PartialEq for SharedDrop {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.snapshot() == other.snapshot()
    }
}

impl fmt::Debug for SharedDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.0.cache.lock().keys().cloned().collect();
        keys.sort_unstable();
        f.debug_struct("SharedDrop").field("cached", &keys).finish()
    }
}

#[cfg(test)]
mod tests;
