//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use std::iter::{Enumerate, Peekable};
use std::str::Split;

use super::error::{MalformedReason, ParseError, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter, normalize_name};

/// One unfolded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line.
    pub number: usize,
    /// Line content with folds removed.
    pub text: String,
}

/// Lazy iterator over logical lines. See [`unfold`].
#[derive(Debug)]
pub struct Unfold<'a> {
    lines: Peekable<Enumerate<Split<'a, char>>>,
}

/// Splits input into logical lines, merging folded continuations.
///
/// Handles both CRLF and bare LF line endings. Lines starting with SP/HTAB are
/// treated as continuations of the previous line. Per RFC 5545 §3.1, unfolding
/// removes the line break and the whitespace character (no space is inserted).
/// Blank lines are skipped.
#[must_use]
pub fn unfold(input: &str) -> Unfold<'_> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    Unfold {
        lines: input.split('\n').enumerate().peekable(),
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn continuation(line: &str) -> Option<&str> {
    line.strip_prefix([' ', '\t'])
}

impl Iterator for Unfold<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, raw) = self.lines.next()?;
            let line = strip_cr(raw);
            if line.is_empty() {
                continue;
            }

            let mut text = if let Some(orphan) = continuation(line) {
                // Nothing to attach to: keep it as a line of its own.
                tracing::warn!(
                    line = index + 1,
                    "Continuation line without a preceding content line"
                );
                orphan.to_string()
            } else {
                line.to_string()
            };

            while let Some(rest) = self
                .lines
                .peek()
                .and_then(|&(_, next)| continuation(strip_cr(next)))
            {
                text.push_str(rest);
                self.lines.next();
            }

            if text.is_empty() {
                continue;
            }

            return Some(LogicalLine {
                number: index + 1,
                text,
            });
        }
    }
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns [`ParseError::MalformedLine`] if there is no value delimiter, the
/// name is empty, a quoted parameter value is not closed, or a parameter is
/// not of the form `KEY=VALUE`.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let malformed = |reason| ParseError::malformed(line_num, reason);

    let colon = find_unquoted(line, ':')
        .map_err(malformed)?
        .ok_or_else(|| malformed(MalformedReason::MissingColon))?;

    let head = &line[..colon];
    let raw_value = &line[colon + 1..];

    let mut segments = split_unquoted(head, ';').map_err(malformed)?.into_iter();
    let name = normalize_name(segments.next().unwrap_or_default());
    if name.is_empty() {
        return Err(malformed(MalformedReason::EmptyName));
    }

    let params = segments
        .map(parse_parameter)
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;

    Ok(ContentLine {
        name,
        params,
        raw_value: raw_value.to_string(),
    })
}

/// Parses `KEY=VALUE[,VALUE...]`.
fn parse_parameter(segment: &str) -> Result<Parameter, MalformedReason> {
    let invalid = || MalformedReason::InvalidParameter(segment.to_string());

    let (key, value) = segment.split_once('=').ok_or_else(invalid)?;
    let key = normalize_name(key);
    if key.is_empty() {
        return Err(invalid());
    }

    let values = split_unquoted(value, ',')?
        .into_iter()
        .map(|v| decode_caret(unquote(v)))
        .collect();

    Ok(Parameter::with_values(key, values))
}

/// Returns the byte offset of the first `sep` outside a quoted parameter
/// value and not preceded by a backslash escape.
///
/// A double quote opens a quoted section only at the start of a value, i.e.
/// at the start of the input or right after `=` or `,`.
fn find_unquoted(s: &str, sep: char) -> Result<Option<usize>, MalformedReason> {
    let mut in_quotes = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (i, c) in s.char_indices() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
            }
        } else if escaped {
            escaped = false;
        } else if c == '"' && matches!(prev, None | Some('=' | ',')) {
            in_quotes = true;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            return Ok(Some(i));
        }
        prev = Some(c);
    }

    if in_quotes {
        Err(MalformedReason::UnclosedQuote)
    } else {
        Ok(None)
    }
}

fn split_unquoted(s: &str, sep: char) -> Result<Vec<&str>, MalformedReason> {
    let mut pieces = Vec::new();
    let mut rest = s;
    while let Some(i) = find_unquoted(rest, sep)? {
        pieces.push(&rest[..i]);
        rest = &rest[i + sep.len_utf8()..];
    }
    pieces.push(rest);
    Ok(pieces)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Decodes RFC 6868 caret sequences in a parameter value.
fn decode_caret(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '^' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                result.push('^');
                chars.next();
            }
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('\'') => {
                result.push('"');
                chars.next();
            }
            // Invalid caret escape, preserve as-is
            _ => result.push('^'),
        }
    }

    result
}
