//! Projection of the document model to JSON.

mod json;

pub use json::{component_to_json, to_json};
