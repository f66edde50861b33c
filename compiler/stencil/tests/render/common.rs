//! Shared helpers for facade tests.

use stencil::{Data, Engine, Hash};

/// Render `source` with the default engine against `data`.
pub fn render_with(source: &str, data: &mut Data) -> String {
    Engine::default().parse_and_render(source, data).unwrap()
}

/// Render `source` with the default engine against an empty hash.
pub fn render(source: &str) -> String {
    render_with(source, &mut Data::hash())
}

pub fn hash<const N: usize>(pairs: [(&str, Data); N]) -> Data {
    Data::Hash(Hash::from_pairs(pairs).unwrap())
}

pub fn ints(values: &[i64]) -> Data {
    Data::Array(values.iter().copied().map(Data::Int).collect())
}
