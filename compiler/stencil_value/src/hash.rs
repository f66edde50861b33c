//! String-keyed hash values.

use crate::{Data, ValueError};
use rustc_hash::FxHashMap;

/// A mapping from string keys to data.
///
/// Iteration order is unspecified; [`Hash::sorted`] gives a stable order
/// when one is needed (rendering, `for` loops over hashes).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hash {
    entries: FxHashMap<String, Data>,
}

impl Hash {
    pub fn new() -> Self {
        Hash::default()
    }

    /// Build a hash from key/value pairs, failing on the first duplicate key.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, ValueError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Data)>,
    {
        let mut hash = Hash::new();
        for (key, value) in pairs {
            hash.insert(key, value)?;
        }
        Ok(hash)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Data> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a new key. Keys are unique: inserting an existing key fails.
    pub fn insert(&mut self, key: impl Into<String>, value: Data) -> Result<(), ValueError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(ValueError::DuplicateKey { key });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Insert or overwrite, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Data) -> Option<Data> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Data> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Data)> {
        self.entries.iter()
    }

    /// Entries ordered by key.
    pub fn sorted(&self) -> Vec<(&String, &Data)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
