//! Invocation-string tokenizer
//!
//! Turns the raw invocation text (program path already removed) into a flat
//! list of [`CommandLineElement`]s paired with the byte range each one was
//! read from, the same `(token, range)` shape the rest of the crate uses for
//! spans.
//!
//! Grammar, tried in this order at every token start:
//!
//! ```text
//! definition := "-" key WS+ value     (only for registered definition keys)
//!             | "-" key ":" value?
//! switch     := ("--" | "-") key      (followed by whitespace or end)
//! argument   := quoted | bare
//! value      := quoted | bare
//! quoted     := '"' rawChar* '"'?     (no escapes; unterminated runs to end)
//! ```
//!
//! Whether `-key value` is one definition or a switch followed by an argument
//! depends on the keys registered as definitions, so the tokenizer is built
//! with that key set.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use super::combinators::{repeat, repeat1, satisfy, Parser};
use super::cursor::{Cursor, StrCursor};
use super::elements::CommandLineElement;
use super::ParseOutcome;

/// An element with the byte range of the source text it was read from.
pub type SpannedElement = (CommandLineElement, Range<usize>);

type TextParser<T> = Parser<StrCursor, T>;

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_key_char(c: char) -> bool {
    !is_blank(c) && c != ':' && c != '"'
}

fn ch(expected: char) -> TextParser<char> {
    satisfy(move |c: &char| *c == expected)
}

fn whitespace() -> TextParser<Vec<char>> {
    repeat(satisfy(|c: &char| is_blank(*c)))
}

/// Succeeds without consuming when the next char ends a token.
fn token_end() -> TextParser<()> {
    Parser::new(|input: StrCursor| match input.next_item() {
        Some((c, _)) if !is_blank(c) => ParseOutcome::NoMatch,
        _ => ParseOutcome::Matched((), input),
    })
}

fn quoted() -> TextParser<String> {
    ch('"')
        .ignore_then(repeat(satisfy(|c: &char| *c != '"')))
        .then_ignore(ch('"').optional())
        .map(|chars| chars.into_iter().collect())
}

fn bare() -> TextParser<String> {
    repeat1(satisfy(|c: &char| !is_blank(*c))).map(|chars| chars.into_iter().collect())
}

fn key() -> TextParser<String> {
    satisfy(|c: &char| is_key_char(*c) && *c != '-')
        .then(repeat(satisfy(|c: &char| is_key_char(*c))))
        .map(|(first, rest)| std::iter::once(first).chain(rest).collect())
}

fn value() -> TextParser<String> {
    quoted().or(bare())
}

fn inline_value() -> TextParser<String> {
    quoted().or(repeat(satisfy(|c: &char| !is_blank(*c))).map(|chars| chars.into_iter().collect()))
}

fn separate_definition(keys: Arc<HashSet<String>>) -> TextParser<CommandLineElement> {
    ch('-')
        .ignore_then(key().filter(move |key| keys.contains(key)))
        .then_ignore(repeat1(satisfy(|c: &char| is_blank(*c))))
        .then(value())
        .map(|(key, value)| CommandLineElement::Definition { key, value })
}

fn inline_definition() -> TextParser<CommandLineElement> {
    ch('-')
        .ignore_then(key())
        .then_ignore(ch(':'))
        .then(inline_value())
        .map(|(key, value)| CommandLineElement::Definition { key, value })
}

fn switch() -> TextParser<CommandLineElement> {
    ch('-')
        .ignore_then(ch('-').optional())
        .ignore_then(key())
        .then_ignore(token_end())
        .map(CommandLineElement::switch)
}

fn argument() -> TextParser<CommandLineElement> {
    value().map(|text| CommandLineElement::Argument { text })
}

/// Tokenizer parametrized by the keys registered as definitions.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    definition_keys: Arc<HashSet<String>>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys whose `-key value` form reads the following token as the value.
    /// Matching is case-sensitive, like definition patterns.
    pub fn with_definition_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Tokenizer {
            definition_keys: Arc::new(keys.into_iter().map(Into::into).collect()),
        }
    }

    pub fn definition_keys(&self) -> &HashSet<String> {
        &self.definition_keys
    }

    /// Parser for one element, skipping leading whitespace.
    fn element(&self) -> TextParser<SpannedElement> {
        let element = separate_definition(Arc::clone(&self.definition_keys))
            .or(inline_definition())
            .or(switch())
            .or(argument());
        whitespace().ignore_then(element.spanned())
    }

    /// Tokenize `text` into spanned elements.
    pub fn tokenize(&self, text: &str) -> Vec<SpannedElement> {
        let parser = self.element();
        let mut cursor = StrCursor::new(text);
        let mut elements = Vec::new();
        while let ParseOutcome::Matched(element, rest) = parser.parse(cursor.clone()) {
            log::debug!("token {:?} -> {}", &text[element.1.clone()], element.0);
            elements.push(element);
            cursor = rest;
        }
        elements
    }

    /// Tokenize `text`, dropping the spans.
    pub fn elements(&self, text: &str) -> Vec<CommandLineElement> {
        self.tokenize(text)
            .into_iter()
            .map(|(element, _)| element)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(keys: &[&str], text: &str) -> Vec<CommandLineElement> {
        Tokenizer::with_definition_keys(keys.iter().copied()).elements(text)
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokens(&[], "").is_empty());
        assert!(tokens(&[], " \t  ").is_empty());
    }

    #[test]
    fn test_bare_arguments() {
        assert_eq!(
            tokens(&[], "install\tstart "),
            vec![
                CommandLineElement::argument("install"),
                CommandLineElement::argument("start"),
            ]
        );
    }

    #[test]
    fn test_switch_forms() {
        assert_eq!(
            tokens(&[], "--autostart -sudo"),
            vec![
                CommandLineElement::switch("autostart"),
                CommandLineElement::switch("sudo"),
            ]
        );
    }

    #[test]
    fn test_inline_definition() {
        assert_eq!(
            tokens(&[], "-password:abc123!@#=$%^&*()-+"),
            vec![CommandLineElement::definition("password", "abc123!@#=$%^&*()-+")]
        );
        assert_eq!(
            tokens(&[], "-volumeLevel:11"),
            vec![CommandLineElement::definition("volumeLevel", "11")]
        );
    }

    #[test]
    fn test_inline_definition_quoted_and_empty() {
        assert_eq!(
            tokens(&[], r#"-description:"Joe is good" -empty:"#),
            vec![
                CommandLineElement::definition("description", "Joe is good"),
                CommandLineElement::definition("empty", ""),
            ]
        );
    }

    #[test]
    fn test_separate_value_requires_registered_key() {
        assert_eq!(
            tokens(&["servicename"], "-servicename Joe"),
            vec![CommandLineElement::definition("servicename", "Joe")]
        );
        assert_eq!(
            tokens(&[], "-servicename Joe"),
            vec![
                CommandLineElement::switch("servicename"),
                CommandLineElement::argument("Joe"),
            ]
        );
    }

    #[test]
    fn test_separate_value_is_case_sensitive() {
        assert_eq!(
            tokens(&["servicename"], "-ServiceName Joe"),
            vec![
                CommandLineElement::switch("ServiceName"),
                CommandLineElement::argument("Joe"),
            ]
        );
    }

    #[test]
    fn test_quoted_value_keeps_everything_literally() {
        assert_eq!(
            tokens(&["password"], r#"-password "abc123=:,.<>/?;!@#$%^&*()-+""#),
            vec![CommandLineElement::definition(
                "password",
                "abc123=:,.<>/?;!@#$%^&*()-+"
            )]
        );
        assert_eq!(
            tokens(&["displayname"], r#"-displayname "Joe (Instance: 42)""#),
            vec![CommandLineElement::definition("displayname", "Joe (Instance: 42)")]
        );
    }

    #[test]
    fn test_separate_value_may_start_with_dash() {
        assert_eq!(
            tokens(&["k"], "-k -+ --manual"),
            vec![
                CommandLineElement::definition("k", "-+"),
                CommandLineElement::switch("manual"),
            ]
        );
    }

    #[test]
    fn test_registered_key_at_end_is_a_switch() {
        assert_eq!(
            tokens(&["password"], "-password  "),
            vec![CommandLineElement::switch("password")]
        );
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(
            tokens(&[], r#""open ended"#),
            vec![CommandLineElement::argument("open ended")]
        );
    }

    #[test]
    fn test_odd_dashes_are_arguments() {
        assert_eq!(
            tokens(&[], r#"- -- --key:value -key"x""#),
            vec![
                CommandLineElement::argument("-"),
                CommandLineElement::argument("--"),
                CommandLineElement::argument("--key:value"),
                CommandLineElement::argument(r#"-key"x""#),
            ]
        );
    }

    #[test]
    fn test_spans_cover_source_text() {
        let tokenizer = Tokenizer::with_definition_keys(["instance"]);
        let text = r#"install  -instance "42" --manual"#;
        let spans: Vec<&str> = tokenizer
            .tokenize(text)
            .into_iter()
            .map(|(_, range)| &text[range])
            .collect();

        assert_eq!(spans, vec!["install", r#"-instance "42""#, "--manual"]);
    }
}
