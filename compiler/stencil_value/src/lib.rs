//! Stencil value - the runtime data model.
//!
//! This crate provides:
//! - [`Data`]: the closed tagged union every template value belongs to
//! - [`Hash`]: string-keyed maps with unique-key insertion
//! - [`DropObject`] / [`SharedDrop`]: lazily loaded host objects with a
//!   per-instance read-cache
//! - [`ValueError`]: structural errors from writes
//!
//! Reads are total: lookups that miss resolve to the shared [`NIL`].

mod data;
mod drop;
mod error;
mod hash;

pub use data::{Data, NIL};
pub use drop::{DropObject, SharedDrop};
pub use error::ValueError;
pub use hash::Hash;
