//! iCalendar component types (RFC 5545 §3.4-3.6).

use super::{Property, Value};

/// A BEGIN/END-delimited component (`VCALENDAR`, `VEVENT`, `VALARM`, ...).
///
/// Properties and children are kept in source order. The same property name
/// may occur any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Component {
    /// Component name (normalized to uppercase).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested components in order of appearance.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates an empty component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns every property with the given name, in order.
    pub fn properties_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().filter(move |p| p.name == name_upper)
    }

    /// Returns every child component with the given name, in order.
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Component> {
        let name_upper = name.to_ascii_uppercase();
        self.children.iter().filter(move |c| c.name == name_upper)
    }

    /// Groups property values by name.
    ///
    /// Names appear in order of first occurrence; values keep source order.
    #[must_use]
    pub fn grouped_properties(&self) -> Vec<(&str, Vec<&Value>)> {
        group_by_name(self.properties.iter().map(|p| (p.name.as_str(), &p.value)))
    }

    /// Groups child components by name, with the same ordering rules as
    /// [`Component::grouped_properties`].
    #[must_use]
    pub fn grouped_children(&self) -> Vec<(&str, Vec<&Component>)> {
        group_by_name(self.children.iter().map(|c| (c.name.as_str(), c)))
    }
}

fn group_by_name<'a, T>(items: impl Iterator<Item = (&'a str, T)>) -> Vec<(&'a str, Vec<T>)> {
    let mut groups: Vec<(&'a str, Vec<T>)> = Vec::new();
    for (name, item) in items {
        match groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((name, vec![item])),
        }
    }
    groups
}
