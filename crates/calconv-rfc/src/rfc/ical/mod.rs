//! iCalendar implementation (RFC 5545).
//!
//! Converts iCalendar text into an order-preserving JSON document.
//!
//! ## Usage
//!
//! ```rust
//! use calconv_rfc::rfc::ical::convert;
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! BEGIN:VEVENT\r\n\
//! SUMMARY:Meeting\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let json = convert(input).unwrap();
//! assert_eq!(json["type"], "VCALENDAR");
//! assert_eq!(json["components"]["VEVENT"][0]["SUMMARY"], "Meeting");
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Document model (`Component`, `Property`, `Parameter`, `Value`)
//! - [`parse`] - Unfolding, tokenizing, value decoding and tree building
//! - [`build`] - JSON projection

pub mod build;
pub mod convert;
pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::to_json;
pub use convert::{convert, convert_bytes, convert_with};
pub use core::{Component, ContentLine, Parameter, Property, Value};
pub use parse::{ParseError, ParseOptions, ParseResult, parse, parse_with};
