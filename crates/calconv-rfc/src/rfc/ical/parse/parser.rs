//! iCalendar document parser (RFC 5545).
//!
//! Builds the component tree from the content line stream.

use super::error::{ParseError, ParseResult, StructuralReason};
use super::lexer::{LogicalLine, parse_content_line, unfold};
use super::options::ParseOptions;
use super::values::decode_value;
use crate::rfc::ical::core::{Component, ContentLine, Property, normalize_name};

/// Parses iCalendar text with default options.
///
/// Returns the root-level components in source order; empty input yields
/// an empty list.
///
/// ## Errors
///
/// Returns an error if a line is malformed, BEGIN/END nesting is broken, a
/// property appears outside any component, or input ends inside a component.
pub fn parse(input: &str) -> ParseResult<Vec<Component>> {
    parse_with(input, &ParseOptions::default())
}

/// Parses iCalendar text.
///
/// ## Errors
///
/// See [`parse`].
#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
pub fn parse_with(input: &str, options: &ParseOptions) -> ParseResult<Vec<Component>> {
    tracing::debug!("Parsing iCalendar document");

    let mut builder = ComponentBuilder::new(options);
    for line in unfold(input) {
        builder.feed(&line)?;
    }
    let roots = builder.finish()?;

    tracing::debug!(roots = roots.len(), "iCalendar document parsed successfully");

    Ok(roots)
}

/// Stack-based builder that assembles BEGIN/END blocks into a tree.
///
/// With an empty stack the builder is outside any component. Each open
/// component sits on the stack until its END line, at which point it moves
/// into its parent (or into the root list).
#[derive(Debug)]
pub struct ComponentBuilder<'a> {
    options: &'a ParseOptions,
    stack: Vec<Component>,
    roots: Vec<Component>,
}

impl<'a> ComponentBuilder<'a> {
    /// Creates a builder in the outside state.
    #[must_use]
    pub const fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Tokenizes one logical line and applies it.
    ///
    /// ## Errors
    ///
    /// Returns the tokenizer error or a structural error.
    pub fn feed(&mut self, line: &LogicalLine) -> ParseResult<()> {
        let content_line = parse_content_line(&line.text, line.number)?;
        self.apply(content_line, line.number)
    }

    /// Applies one tokenized line.
    ///
    /// ## Errors
    ///
    /// Returns [`ParseError::Structural`] for a nameless BEGIN, a BEGIN
    /// beyond the nesting limit, an END that does not close the innermost
    /// open component, or a property outside any component.
    pub fn apply(&mut self, cl: ContentLine, line_num: usize) -> ParseResult<()> {
        match cl.name.as_str() {
            "BEGIN" => {
                let name = normalize_name(&cl.raw_value);
                if name.is_empty() {
                    return Err(ParseError::structural(line_num, StructuralReason::EmptyBegin));
                }
                let limit = self.options.max_depth();
                if self.stack.len() >= limit {
                    tracing::warn!(line = line_num, limit, "Component nesting too deep");
                    return Err(ParseError::structural(
                        line_num,
                        StructuralReason::NestingTooDeep { limit },
                    ));
                }
                tracing::trace!(component = %name, depth = self.stack.len(), "BEGIN");
                self.stack.push(Component::new(name));
            }
            "END" => {
                let found = normalize_name(&cl.raw_value);
                let Some(open) = self.stack.pop() else {
                    return Err(ParseError::structural(
                        line_num,
                        StructuralReason::UnmatchedEnd { found },
                    ));
                };
                if open.name != found {
                    return Err(ParseError::structural(
                        line_num,
                        StructuralReason::MismatchedEnd {
                            expected: open.name,
                            found,
                        },
                    ));
                }
                tracing::trace!(component = %found, depth = self.stack.len(), "END");
                match self.stack.last_mut() {
                    Some(parent) => parent.children.push(open),
                    None => self.roots.push(open),
                }
            }
            _ => {
                let Some(current) = self.stack.last_mut() else {
                    tracing::warn!(line = line_num, property = %cl.name, "Property outside any component");
                    return Err(ParseError::structural(
                        line_num,
                        StructuralReason::PropertyOutsideComponent { name: cl.name },
                    ));
                };
                let value = decode_value(&cl, self.options);
                current.properties.push(Property {
                    name: cl.name,
                    params: cl.params,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Returns the number of currently open components.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Finishes the stream and returns the root components.
    ///
    /// ## Errors
    ///
    /// Returns [`ParseError::UnterminatedComponent`] naming the open
    /// components, outermost first, if any are still open.
    pub fn finish(self) -> ParseResult<Vec<Component>> {
        if !self.stack.is_empty() {
            let open: Vec<String> = self.stack.into_iter().map(|c| c.name).collect();
            tracing::warn!(open = ?open, "Input ended inside a component");
            return Err(ParseError::UnterminatedComponent { open });
        }
        Ok(self.roots)
    }
}
