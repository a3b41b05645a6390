use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// Errors returned by the conversion entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RfcError {
    #[error("Invalid iCal data: {0}")]
    Parse(#[from] ParseError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
