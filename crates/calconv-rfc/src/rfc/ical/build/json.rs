//! JSON projection of parsed components.
//!
//! A component becomes an object with a `type` key, one key per distinct
//! property name, and a `components` object grouping children by type.
//! A property that occurs once maps to its value; one that occurs several
//! times maps to an array of values in source order. Child groups are always
//! arrays.

use serde_json::{Map, Value as Json};

use crate::rfc::ical::core::Component;

/// Key holding the component name.
pub const TYPE_KEY: &str = "type";
/// Key holding the child components.
pub const COMPONENTS_KEY: &str = "components";

/// Projects the root components of a document.
///
/// No roots give an empty array, a single root gives its object, several
/// roots give an array of objects.
#[must_use]
pub fn to_json(roots: &[Component]) -> Json {
    match roots {
        [single] => component_to_json(single),
        _ => Json::Array(roots.iter().map(component_to_json).collect()),
    }
}

/// Projects one component and its subtree.
#[must_use]
pub fn component_to_json(component: &Component) -> Json {
    let mut object = Map::new();
    object.insert(TYPE_KEY.to_string(), Json::String(component.name.clone()));

    for (name, values) in component.grouped_properties() {
        let projected = match values.as_slice() {
            [single] => Json::from(*single),
            many => Json::Array(many.iter().map(|v| Json::from(*v)).collect()),
        };
        object.insert(name.to_string(), projected);
    }

    if !component.children.is_empty() {
        let components: Map<String, Json> = component
            .grouped_children()
            .into_iter()
            .map(|(name, children)| {
                let items = children.into_iter().map(component_to_json).collect();
                (name.to_string(), Json::Array(items))
            })
            .collect();
        object.insert(COMPONENTS_KEY.to_string(), Json::Object(components));
    }

    Json::Object(object)
}
