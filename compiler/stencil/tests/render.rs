// Test code uses unwrap for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used)]

//! End-to-end tests through the `stencil` facade.
//!
//! # Organization
//!
//! - `common` - Shared helpers
//! - `examples` - The documented rendering examples and data laws
//! - `isolation` - Independence of repeated renders
//! - `extension` - Host tags, filters and drops
//! - `errors` - Compile and render failures seen by a host

#[path = "render/common.rs"]
mod common;

#[path = "render/examples.rs"]
mod examples;

#[path = "render/isolation.rs"]
mod isolation;

#[path = "render/extension.rs"]
mod extension;

#[path = "render/errors.rs"]
mod errors;
