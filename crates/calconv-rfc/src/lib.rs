//! iCalendar (RFC 5545) to JSON conversion.
//!
//! The [`rfc::ical`] module holds the parser and the JSON projection; the
//! [`rfc::ical::convert`] entry point ties them together.

pub mod error;
pub mod rfc;
