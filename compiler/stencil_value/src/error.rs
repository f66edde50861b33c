//! Structural errors raised by data operations.

use std::fmt;

/// An operation was applied to data of the wrong shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueError {
    /// `Hash::insert` with a key that is already present.
    DuplicateKey { key: String },
    /// A hash operation on a value that is not a hash.
    NotAHash { type_name: &'static str },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key } => write!(f, "duplicate hash key `{key}`"),
            Self::NotAHash { type_name } => {
                write!(f, "expected a hash, found {type_name}")
            }
        }
    }
}

impl std::error::Error for ValueError {}
