//! Element pattern matchers
//!
//! The combinator library instantiated over [`ElementCursor`]. These are the
//! building blocks for patterns: each consumes at most one element and yields
//! the data the pattern needs from it.

use std::path::Path;

use super::combinators::{any, Parser};
use super::cursor::{Cursor, ElementCursor};
use super::elements::CommandLineElement;
use super::ParseOutcome;

pub type ElementParser<T> = Parser<ElementCursor, T>;

/// Consume exactly one element if any remain.
pub fn any_element() -> ElementParser<CommandLineElement> {
    any()
}

/// Match without consuming when positioned at the first element.
pub fn at_start() -> ElementParser<()> {
    Parser::new(|input: ElementCursor| {
        if input.offset() == 0 {
            ParseOutcome::Matched((), input)
        } else {
            ParseOutcome::NoMatch
        }
    })
}

/// Any switch, yielding `(key, value)`.
pub fn switch() -> ElementParser<(String, bool)> {
    any_element().filter_map(|element| match element {
        CommandLineElement::Switch { key, value } => Some((key, value)),
        _ => None,
    })
}

/// A switch whose key equals `name`, ignoring case. Yields the switch value.
pub fn switch_named(name: impl Into<String>) -> ElementParser<bool> {
    let name = name.into();
    switch()
        .filter(move |(key, _)| key.eq_ignore_ascii_case(&name))
        .map(|(_, value)| value)
}

/// Any definition, yielding `(key, value)`.
pub fn definition() -> ElementParser<(String, String)> {
    any_element().filter_map(|element| match element {
        CommandLineElement::Definition { key, value } => Some((key, value)),
        _ => None,
    })
}

/// A definition whose key equals `key` exactly. Yields the value.
pub fn definition_named(key: impl Into<String>) -> ElementParser<String> {
    let expected = key.into();
    definition()
        .filter(move |(key, _)| *key == expected)
        .map(|(_, value)| value)
}

/// Any argument, yielding its text.
pub fn argument() -> ElementParser<String> {
    any_element().filter_map(|element| match element {
        CommandLineElement::Argument { text } => Some(text),
        _ => None,
    })
}

/// An argument whose text equals `value`, ignoring case.
pub fn argument_equals(value: impl Into<String>) -> ElementParser<String> {
    let value = value.into();
    argument().filter(move |text| text.eq_ignore_ascii_case(&value))
}

/// An argument accepted by `pred`.
pub fn argument_matching<F>(pred: F) -> ElementParser<String>
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    argument().filter(move |text| pred(text))
}

/// An argument naming an existing directory, absolute or relative to the
/// current working directory.
pub fn valid_path_argument() -> ElementParser<String> {
    argument_matching(is_existing_directory)
}

fn is_existing_directory(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let path = Path::new(text);
    if path.is_absolute() {
        return path.is_dir();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path).is_dir(),
        Err(_) => false,
    }
}
