//! Classified command-line elements

use serde::Serialize;
use std::fmt;

/// One classified token of an invocation string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CommandLineElement {
    /// A bare positional token.
    Argument { text: String },
    /// A boolean flag, `--key` or `-key`. Always true when present.
    Switch { key: String, value: bool },
    /// A key/value pair, `-key:value` or `-key value`.
    Definition { key: String, value: String },
}

impl CommandLineElement {
    pub fn argument(text: impl Into<String>) -> Self {
        CommandLineElement::Argument { text: text.into() }
    }

    pub fn switch(key: impl Into<String>) -> Self {
        CommandLineElement::Switch {
            key: key.into(),
            value: true,
        }
    }

    pub fn definition(key: impl Into<String>, value: impl Into<String>) -> Self {
        CommandLineElement::Definition {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Key of a switch or definition.
    pub fn key(&self) -> Option<&str> {
        match self {
            CommandLineElement::Argument { .. } => None,
            CommandLineElement::Switch { key, .. } | CommandLineElement::Definition { key, .. } => {
                Some(key)
            }
        }
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, CommandLineElement::Argument { .. })
    }
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty() || text.contains(|c: char| c == ' ' || c == '\t')
}

impl fmt::Display for CommandLineElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLineElement::Argument { text } if needs_quotes(text) => {
                write!(f, "\"{}\"", text)
            }
            CommandLineElement::Argument { text } => write!(f, "{}", text),
            CommandLineElement::Switch { key, .. } => write!(f, "--{}", key),
            CommandLineElement::Definition { key, value } if needs_quotes(value) => {
                write!(f, "-{}:\"{}\"", key, value)
            }
            CommandLineElement::Definition { key, value } => write!(f, "-{}:{}", key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        insta::assert_snapshot!(CommandLineElement::argument("install").to_string(), @"install");
        insta::assert_snapshot!(CommandLineElement::switch("manual").to_string(), @"--manual");
        insta::assert_snapshot!(
            CommandLineElement::definition("description", "Joe is good").to_string(),
            @r#"-description:"Joe is good""#
        );
        insta::assert_snapshot!(
            CommandLineElement::definition("volumeLevel", "11").to_string(),
            @"-volumeLevel:11"
        );
    }

    #[test]
    fn test_key_accessor() {
        assert_eq!(CommandLineElement::switch("sudo").key(), Some("sudo"));
        assert_eq!(CommandLineElement::definition("instance", "42").key(), Some("instance"));
        assert_eq!(CommandLineElement::argument("start").key(), None);
        assert!(CommandLineElement::argument("start").is_argument());
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_string(&CommandLineElement::switch("delayed")).unwrap();
        assert_eq!(json, r#"{"kind":"switch","key":"delayed","value":true}"#);
    }
}
