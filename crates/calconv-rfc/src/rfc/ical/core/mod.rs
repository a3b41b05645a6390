//! iCalendar document model (RFC 5545).
//!
//! The tree produced by the parser. Nodes own their children; properties and
//! children keep source order, and repeated property names are kept as
//! separate entries.

mod component;
mod parameter;
mod property;
mod value;

pub use component::Component;
pub use parameter::Parameter;
pub use property::{ContentLine, Property};
pub use value::Value;

/// Normalizes a property, parameter or component name for comparison and
/// output.
///
/// All case-insensitive name handling goes through here.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
