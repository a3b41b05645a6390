//! iCalendar parse error types.

use thiserror::Error;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing iCalendar text.
///
/// Line numbers are 1-based and refer to the first physical line of the
/// offending logical line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A content line has no parseable `name *(";" param) ":" value` shape.
    #[error("line {line}: malformed content line: {reason}")]
    MalformedLine { line: usize, reason: MalformedReason },

    /// BEGIN/END nesting is broken, or a property has no enclosing component.
    #[error("line {line}: {reason}")]
    Structural {
        line: usize,
        reason: StructuralReason,
    },

    /// Input ended with components still open, outermost first.
    #[error("unterminated component: {}", .open.join(" > "))]
    UnterminatedComponent { open: Vec<String> },
}

impl ParseError {
    /// Creates a malformed-line error.
    #[must_use]
    pub const fn malformed(line: usize, reason: MalformedReason) -> Self {
        Self::MalformedLine { line, reason }
    }

    /// Creates a structural error.
    #[must_use]
    pub const fn structural(line: usize, reason: StructuralReason) -> Self {
        Self::Structural { line, reason }
    }

    /// Returns the line the error refers to, if it refers to one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedLine { line, .. } | Self::Structural { line, .. } => Some(*line),
            Self::UnterminatedComponent { .. } => None,
        }
    }
}

/// Why a content line could not be tokenized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("missing ':' between property name and value")]
    MissingColon,
    #[error("empty property name")]
    EmptyName,
    #[error("unterminated quoted parameter value")]
    UnclosedQuote,
    #[error("invalid parameter `{0}`")]
    InvalidParameter(String),
}

/// Why the BEGIN/END structure is invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralReason {
    #[error("expected END:{expected}, found END:{found}")]
    MismatchedEnd { expected: String, found: String },
    #[error("END:{found} without matching BEGIN")]
    UnmatchedEnd { found: String },
    #[error("BEGIN without a component name")]
    EmptyBegin,
    #[error("property {name} outside any component")]
    PropertyOutsideComponent { name: String },
    #[error("components nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
