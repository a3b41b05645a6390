//! iCalendar parsing (RFC 5545).
//!
//! Pipeline: [`decode_input`] (bytes only), [`unfold`],
//! [`parse_content_line`], [`decode_value`], then [`ComponentBuilder`].

mod error;
mod lexer;
mod options;
mod parser;
mod text;
mod values;

pub use error::{MalformedReason, ParseError, ParseResult, StructuralReason};
pub use lexer::{LogicalLine, Unfold, parse_content_line, unfold};
pub use options::ParseOptions;
pub use parser::{ComponentBuilder, parse, parse_with};
pub use text::{decode_input, rejoin_split_sequences};
pub use values::{ValueType, decode_value, split_list, unescape_text};
