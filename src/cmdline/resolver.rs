//! First-match option resolver
//!
//! Holds an ordered list of [`Pattern`]s. Resolution walks the element list:
//! at each position the registered patterns are tried in registration order,
//! the first match yields one option, and resolution continues after whatever
//! that pattern consumed. Positions no pattern matches are dropped.

use std::fmt;

use log::debug;

use super::cursor::{Cursor, ElementCursor};
use super::elements::CommandLineElement;
use super::matchers::ElementParser;
use super::options::HostOption;
use super::ParseOutcome;

/// A named element parser producing an option.
pub struct Pattern<T = HostOption> {
    name: String,
    parser: ElementParser<T>,
}

impl<T: 'static> Pattern<T> {
    pub fn new(name: impl Into<String>, parser: ElementParser<T>) -> Self {
        Pattern {
            name: name.into(),
            parser,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse(&self, input: ElementCursor) -> ParseOutcome<T, ElementCursor> {
        self.parser.parse(input)
    }
}

impl<T> Clone for Pattern<T> {
    fn clone(&self) -> Self {
        Pattern {
            name: self.name.clone(),
            parser: self.parser.clone(),
        }
    }
}

impl<T> fmt::Debug for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.name).finish()
    }
}

/// Ordered pattern list. Register everything before resolving.
#[derive(Debug, Clone)]
pub struct OptionResolver<T = HostOption> {
    patterns: Vec<Pattern<T>>,
}

impl<T> Default for OptionResolver<T> {
    fn default() -> Self {
        OptionResolver {
            patterns: Vec::new(),
        }
    }
}

impl<T: 'static> OptionResolver<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pattern; it is tried after every pattern registered before it.
    pub fn register_pattern(&mut self, pattern: Pattern<T>) {
        self.patterns.push(pattern);
    }

    pub fn patterns(&self) -> &[Pattern<T>] {
        &self.patterns
    }

    fn first_match(&self, input: &ElementCursor) -> Option<(&Pattern<T>, T, ElementCursor)> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .parse(input.clone())
                .into_parts()
                .map(|(value, rest)| (pattern, value, rest))
        })
    }

    /// Resolve `elements` into options, in order.
    ///
    /// A pattern that matches without consuming still yields its option, and
    /// the element at that position is then dropped so resolution always
    /// moves forward.
    pub fn resolve(&self, elements: Vec<CommandLineElement>) -> Vec<T> {
        let mut cursor = ElementCursor::new(elements);
        let mut options = Vec::new();

        while let Some(element) = cursor.rest().first() {
            match self.first_match(&cursor) {
                Some((pattern, option, rest)) => {
                    debug!("{} matched by pattern '{}'", element, pattern.name());
                    options.push(option);
                    cursor = if rest.offset() > cursor.offset() {
                        rest
                    } else {
                        cursor.skip()
                    };
                }
                None => {
                    debug!("No pattern matched {}, skipping", element);
                    cursor = cursor.skip();
                }
            }
        }

        options
    }
}
