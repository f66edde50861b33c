//! The `Data` tagged union.
//!
//! # Totality
//!
//! Read access never fails. Indexing a scalar, indexing an array out of
//! range and missing a hash key all resolve to [`NIL`]. Only structural
//! writes (inserting into something that is not a hash) report errors.
//!
//! # Ordering
//!
//! `Int` and `Float` compare with each other after promotion to `f64`;
//! strings compare lexicographically. Every other pairing is unordered, so
//! `<`/`>` between them are simply false.

use crate::{Hash, SharedDrop, ValueError};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Shared nil sentinel returned by failed lookups.
pub static NIL: Data = Data::Nil;

/// A runtime template value.
#[derive(Clone, Debug, Default)]
pub enum Data {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Data>),
    Hash(Hash),
    /// Lazily loaded external object. Copies share one instance.
    Drop(SharedDrop),
}

impl Data {
    /// An empty hash, the usual data root.
    pub fn hash() -> Data {
        Data::Hash(Hash::new())
    }

    /// Name of the active variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Data::Nil => "nil",
            Data::Bool(_) => "bool",
            Data::Int(_) => "int",
            Data::Float(_) => "float",
            Data::String(_) => "string",
            Data::Array(_) => "array",
            Data::Hash(_) => "hash",
            Data::Drop(_) => "drop",
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Data::Nil)
    }

    /// True only for `Bool(true)`.
    #[inline]
    pub fn to_bool(&self) -> bool {
        matches!(self, Data::Bool(true))
    }

    /// False only for `Nil` and `Bool(false)`; `0`, `""` and `[]` are truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Data::Nil | Data::Bool(false))
    }

    pub fn as_hash(&self) -> Option<&Hash> {
        match self {
            Data::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Data]> {
        match self {
            Data::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(s) => Some(s),
            _ => None,
        }
    }

    // Reads

    /// Array element at `index`, or nil when out of range, negative, or
    /// when `self` is not an array.
    pub fn at(&self, index: i64) -> &Data {
        match (self, usize::try_from(index)) {
            (Data::Array(items), Ok(i)) => items.get(i).unwrap_or(&NIL),
            _ => &NIL,
        }
    }

    /// Resolve a named member.
    ///
    /// Hash keys win; otherwise `size` reports the length of strings,
    /// arrays and hashes, arrays also answer `first`, `last` and decimal
    /// indices, and drops are asked to `load` the key.
    pub fn member(&self, key: &str) -> Cow<'_, Data> {
        match self {
            Data::Hash(hash) => match hash.get(key) {
                Some(value) => Cow::Borrowed(value),
                None if key == "size" => Cow::Owned(Data::from(hash.len())),
                None => Cow::Borrowed(&NIL),
            },
            Data::Array(items) => match key {
                "size" => Cow::Owned(Data::from(items.len())),
                "first" => Cow::Borrowed(items.first().unwrap_or(&NIL)),
                "last" => Cow::Borrowed(items.last().unwrap_or(&NIL)),
                _ => match key.parse::<i64>() {
                    Ok(index) => Cow::Borrowed(self.at(index)),
                    Err(_) => Cow::Borrowed(&NIL),
                },
            },
            Data::String(s) if key == "size" => Cow::Owned(Data::from(s.chars().count())),
            Data::Drop(drop) => Cow::Owned(drop.get(key)),
            _ => Cow::Borrowed(&NIL),
        }
    }

    /// Resolve a computed (bracket) key: integers index arrays, strings
    /// name members, anything else resolves to nil.
    pub fn index(&self, key: &Data) -> Cow<'_, Data> {
        match key {
            Data::Int(i) => match self {
                Data::Array(_) => Cow::Borrowed(self.at(*i)),
                _ => self.member(&i.to_string()),
            },
            Data::String(s) => self.member(s),
            _ => Cow::Borrowed(&NIL),
        }
    }

    // Writes

    /// Insert a new key into a hash; duplicate keys are an error.
    pub fn insert(&mut self, key: impl Into<String>, value: Data) -> Result<(), ValueError> {
        match self {
            Data::Hash(hash) => hash.insert(key, value),
            other => Err(ValueError::NotAHash {
                type_name: other.type_name(),
            }),
        }
    }

    /// Insert or overwrite a hash key, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Data) -> Result<Option<Data>, ValueError> {
        match self {
            Data::Hash(hash) => Ok(hash.set(key, value)),
            other => Err(ValueError::NotAHash {
                type_name: other.type_name(),
            }),
        }
    }

    /// Remove a hash key. Non-hashes have nothing to remove.
    pub fn remove(&mut self, key: &str) -> Option<Data> {
        match self {
            Data::Hash(hash) => hash.remove(key),
            _ => None,
        }
    }

    // Comparison

    /// Ordering within matching variants, with Int/Float promotion.
    #[allow(clippy::cast_precision_loss, reason = "numeric promotion")]
    pub fn compare(&self, other: &Data) -> Option<Ordering> {
        match (self, other) {
            (Data::Int(a), Data::Int(b)) => Some(a.cmp(b)),
            (Data::Int(a), Data::Float(b)) => (*a as f64).partial_cmp(b),
            (Data::Float(a), Data::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Data::Float(a), Data::Float(b)) => a.partial_cmp(b),
            (Data::String(a), Data::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Backs the `contains` operator.
    pub fn contains(&self, needle: &Data) -> bool {
        match self {
            Data::String(haystack) => {
                !needle.is_nil()
                    && needle
                        .coerce_string()
                        .is_some_and(|n| haystack.contains(n.as_ref()))
            }
            Data::Array(items) => items.contains(needle),
            Data::Hash(hash) => needle.as_str().is_some_and(|k| hash.contains_key(k)),
            _ => false,
        }
    }

    // Coercion

    /// String form of a scalar. Nil coerces to the empty string; arrays,
    /// hashes and drops have no scalar string form.
    pub fn coerce_string(&self) -> Option<Cow<'_, str>> {
        match self {
            Data::Nil => Some(Cow::Borrowed("")),
            Data::String(s) => Some(Cow::Borrowed(s)),
            Data::Bool(_) | Data::Int(_) | Data::Float(_) => Some(Cow::Owned(self.to_string())),
            Data::Array(_) | Data::Hash(_) | Data::Drop(_) => None,
        }
    }

    /// Integer form: ints, truncated floats and numeric strings.
    #[allow(clippy::cast_possible_truncation, reason = "truncation is the coercion")]
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Data::Int(n) => Some(*n),
            Data::Float(x) if x.is_finite() => Some(x.trunc() as i64),
            Data::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|x| x.is_finite()).map(|x| x as i64))
            }
            _ => None,
        }
    }

    /// Float form: ints, floats and numeric strings.
    #[allow(clippy::cast_precision_loss, reason = "numeric promotion")]
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Data::Int(n) => Some(*n as f64),
            Data::Float(x) => Some(*x),
            Data::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl PartialEq for Data {
    #[allow(clippy::float_cmp, reason = "value equality is exact")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Data::Nil, Data::Nil) => true,
            (Data::Bool(a), Data::Bool(b)) => a == b,
            (Data::Int(a), Data::Int(b)) => a == b,
            (Data::Float(a), Data::Float(b)) => a == b,
            (Data::String(a), Data::String(b)) => a == b,
            (Data::Array(a), Data::Array(b)) => a == b,
            (Data::Hash(a), Data::Hash(b)) => a == b,
            (Data::Drop(a), Data::Drop(b)) => a == b,
            _ => false,
        }
    }
}

/// Render coercion: the text a value contributes to template output.
impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Nil | Data::Hash(_) | Data::Drop(_) => Ok(()),
            Data::Bool(b) => write!(f, "{b}"),
            Data::Int(n) => write!(f, "{n}"),
            Data::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Data::String(s) => f.write_str(s),
            Data::Array(items) => items.iter().try_for_each(|item| write!(f, "{item}")),
        }
    }
}

impl From<bool> for Data {
    fn from(b: bool) -> Self {
        Data::Bool(b)
    }
}

impl From<i64> for Data {
    fn from(n: i64) -> Self {
        Data::Int(n)
    }
}

impl From<i32> for Data {
    fn from(n: i32) -> Self {
        Data::Int(i64::from(n))
    }
}

impl From<usize> for Data {
    fn from(n: usize) -> Self {
        Data::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Data {
    fn from(x: f64) -> Self {
        Data::Float(x)
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Data::String(s.to_owned())
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Data::String(s)
    }
}

impl From<Vec<Data>> for Data {
    fn from(items: Vec<Data>) -> Self {
        Data::Array(items)
    }
}

impl From<Hash> for Data {
    fn from(hash: Hash) -> Self {
        Data::Hash(hash)
    }
}

impl From<SharedDrop> for Data {
    fn from(drop: SharedDrop) -> Self {
        Data::Drop(drop)
    }
}

impl<T: Into<Data>> From<Option<T>> for Data {
    fn from(value: Option<T>) -> Self {
        value.map_or(Data::Nil, Into::into)
    }
}
