//! Property-based tests for tokenizing and resolving invocation strings

use proptest::prelude::*;
use shelfhost::cmdline::{CommandLineElement, CommandLineGrammar, HostOption, Tokenizer};

/// Punctuation a definition value may be made of.
const PUNCTUATION: &str = "[!@#$%^&*()\\-+=:,.<>/?;]{1,12}";

fn key_strategy() -> impl Strategy<Value = String> {
    "k[a-zA-Z0-9]{0,8}"
}

fn element_strategy() -> impl Strategy<Value = CommandLineElement> {
    prop_oneof![
        "[a-z0-9][a-z0-9 ]{0,8}".prop_map(CommandLineElement::argument),
        "[a-z][a-z0-9]{0,6}".prop_map(CommandLineElement::switch),
        ("[a-z][a-z0-9]{0,6}", "[a-z0-9 ]{0,8}")
            .prop_map(|(key, value)| CommandLineElement::definition(key, value)),
    ]
}

fn resolve_custom(key: &str, command_line: &str) -> Vec<HostOption> {
    let mut grammar = CommandLineGrammar::new();
    grammar.add_definition(key);
    grammar.parse(command_line)
}

/// Characters that survive tokenizing: everything except whitespace and quotes.
fn significant(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, ' ' | '\t' | '"')).collect()
}

proptest! {
    #[test]
    fn test_spans_cover_the_input(input in "[a-z\\-: \"!@#]{0,40}") {
        let tokenizer = Tokenizer::with_definition_keys(["ab"]);
        let covered: String = tokenizer
            .tokenize(&input)
            .into_iter()
            .map(|(_, range)| &input[range])
            .collect();

        prop_assert_eq!(significant(&covered), significant(&input));
    }

    #[test]
    fn test_definition_forms_agree(key in key_strategy(), value in PUNCTUATION) {
        let expected = vec![HostOption::CustomDefinition {
            name: key.clone(),
            value: value.clone(),
        }];

        prop_assert_eq!(resolve_custom(&key, &format!("-{}:{}", key, value)), expected.clone());
        prop_assert_eq!(resolve_custom(&key, &format!("-{} {}", key, value)), expected.clone());
        prop_assert_eq!(resolve_custom(&key, &format!("-{} \"{}\"", key, value)), expected);
    }

    #[test]
    fn test_registered_switch_always_resolves(name in "x[a-z]{0,8}") {
        let mut grammar = CommandLineGrammar::new();
        grammar.add_switch(name.clone());

        prop_assert_eq!(
            grammar.parse(&format!("--{}", name)),
            vec![HostOption::CustomSwitch { name: name.clone(), value: true }]
        );
        let without = grammar.parse("install");
        let no_custom_switch = without
            .iter()
            .all(|option| !matches!(option, HostOption::CustomSwitch { .. }));
        prop_assert!(no_custom_switch);
    }

    #[test]
    fn test_display_round_trips(elements in prop::collection::vec(element_strategy(), 0..8)) {
        let text = elements.iter().map(|element| element.to_string()).collect::<Vec<_>>().join(" ");

        prop_assert_eq!(Tokenizer::new().elements(&text), elements);
    }

    #[test]
    fn test_tokenize_never_panics(input in "\\PC{0,40}") {
        let spans = Tokenizer::new().tokenize(&input);
        for (_, range) in spans {
            prop_assert!(range.end <= input.len());
            prop_assert!(input.is_char_boundary(range.start));
            prop_assert!(input.is_char_boundary(range.end));
        }
    }

    #[test]
    fn test_resolution_never_panics(input in "[a-z\\-:\" ]{0,40}") {
        let _ = CommandLineGrammar::new().parse(&input);
    }
}
