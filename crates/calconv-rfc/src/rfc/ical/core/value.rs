//! Decoded property values.

/// The decoded value of one property occurrence.
///
/// Most properties carry a single string. Properties configured as
/// multi-valued (e.g. `CATEGORIES`, `EXDATE`) carry the list obtained by
/// splitting on unescaped commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single value.
    Text(String),
    /// A comma-separated list of values.
    List(Vec<String>),
}

impl Value {
    /// Returns the value as a string if it is single-valued.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the items if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Text(s) => Self::String(s.clone()),
            Value::List(items) => Self::Array(items.iter().cloned().map(Self::String).collect()),
        }
    }
}
