//! Parser configuration.

use calconv_core::constants::{DEFAULT_MAX_NESTING_DEPTH, DEFAULT_MULTI_VALUED_PROPERTIES};

use crate::rfc::ical::core::normalize_name;

/// Options controlling value decoding and structural limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    multi_valued: Vec<String>,
    max_depth: usize,
}

impl ParseOptions {
    /// Creates options with the given multi-valued property allow-list.
    ///
    /// Only listed property names are split on unescaped commas. Names are
    /// matched case-insensitively.
    #[must_use]
    pub fn with_multi_valued<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            multi_valued: names
                .into_iter()
                .map(|n| normalize_name(n.as_ref()))
                .collect(),
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Sets how many components may be open at once.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns how many components may be open at once.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns whether values of `name` are comma-separated lists.
    #[must_use]
    pub fn is_multi_valued(&self, name: &str) -> bool {
        self.multi_valued.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::with_multi_valued(DEFAULT_MULTI_VALUED_PROPERTIES)
    }
}
