//! Built-in command-line grammar
//!
//! Patterns are registered in a fixed order:
//!
//! 1. the leading mode keyword (`install`, `uninstall`, `start`, `stop`, `run`,
//!    `console`, `help`, `debug`, `test`)
//! 2. `-servicename`, `-instance`, `-displayname`, `-description`
//! 3. `--autostart`, `--manual`, `--disabled`, `--delayed`, then `--sudo`
//! 4. caller-registered switches and definitions, in registration order
//! 5. the catch-alls: an unknown leading command, then any unclaimed switch or
//!    definition
//!
//! Bare arguments after the first position that nothing claims are dropped by
//! the resolver.

use once_cell::sync::{Lazy, OnceCell};

use super::combinators::first_match;
use super::elements::CommandLineElement;
use super::matchers::{
    any_element, argument, argument_equals, at_start, definition_named, switch_named,
};
use super::options::HostOption;
use super::resolver::{OptionResolver, Pattern};
use super::tokenizer::Tokenizer;
use crate::host::{StartMode, MODE_KEYWORDS};

pub const SERVICE_NAME_KEY: &str = "servicename";
pub const INSTANCE_KEY: &str = "instance";
pub const DISPLAY_NAME_KEY: &str = "displayname";
pub const DESCRIPTION_KEY: &str = "description";

/// Definition keys understood without registration.
pub const BUILTIN_DEFINITION_KEYS: [&str; 4] =
    [SERVICE_NAME_KEY, INSTANCE_KEY, DISPLAY_NAME_KEY, DESCRIPTION_KEY];

pub const START_MODE_SWITCHES: [(&str, StartMode); 4] = [
    ("autostart", StartMode::Automatic),
    ("manual", StartMode::Manual),
    ("disabled", StartMode::Disabled),
    ("delayed", StartMode::AutomaticDelayed),
];

pub const SUDO_SWITCH: &str = "sudo";

/// A caller-registered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOption {
    Switch(String),
    Definition(String),
}

impl CustomOption {
    pub fn name(&self) -> &str {
        match self {
            CustomOption::Switch(name) | CustomOption::Definition(name) => name,
        }
    }
}

pub fn mode_pattern() -> Pattern {
    let keywords = MODE_KEYWORDS.iter().map(|(word, mode)| {
        let mode = *mode;
        argument_equals(*word).map(move |_| mode)
    });
    Pattern::new(
        "mode",
        at_start().ignore_then(first_match(keywords)).map(HostOption::Mode),
    )
}

pub fn name_patterns() -> Vec<Pattern> {
    vec![
        Pattern::new(
            SERVICE_NAME_KEY,
            definition_named(SERVICE_NAME_KEY).map(HostOption::ServiceName),
        ),
        Pattern::new(
            INSTANCE_KEY,
            definition_named(INSTANCE_KEY).map(HostOption::InstanceName),
        ),
        Pattern::new(
            DISPLAY_NAME_KEY,
            definition_named(DISPLAY_NAME_KEY).map(HostOption::DisplayName),
        ),
        Pattern::new(
            DESCRIPTION_KEY,
            definition_named(DESCRIPTION_KEY).map(HostOption::Description),
        ),
    ]
}

pub fn start_mode_patterns() -> Vec<Pattern> {
    START_MODE_SWITCHES
        .iter()
        .map(|(name, mode)| {
            let mode = *mode;
            Pattern::new(
                *name,
                switch_named(*name).map(move |_| HostOption::StartMode(mode)),
            )
        })
        .collect()
}

pub fn sudo_pattern() -> Pattern {
    Pattern::new(SUDO_SWITCH, switch_named(SUDO_SWITCH).map(|_| HostOption::Sudo))
}

pub fn custom_pattern(option: &CustomOption) -> Pattern {
    match option {
        CustomOption::Switch(name) => {
            let registered = name.clone();
            Pattern::new(
                name.clone(),
                switch_named(name.clone()).map(move |value| HostOption::CustomSwitch {
                    name: registered.clone(),
                    value,
                }),
            )
        }
        CustomOption::Definition(key) => {
            let registered = key.clone();
            Pattern::new(
                key.clone(),
                definition_named(key.clone()).map(move |value| HostOption::CustomDefinition {
                    name: registered.clone(),
                    value,
                }),
            )
        }
    }
}

pub fn unknown_patterns() -> Vec<Pattern> {
    vec![
        Pattern::new(
            "unknown-command",
            at_start()
                .ignore_then(argument())
                .filter(|text| !text.is_empty())
                .map(HostOption::UnknownCommand),
        ),
        Pattern::new(
            "unknown",
            any_element()
                .filter(|element| !element.is_argument())
                .map(|element: CommandLineElement| HostOption::Unknown(element.to_string())),
        ),
    ]
}

/// Patterns registered ahead of any caller option, built once.
static BUILTIN_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    let mut patterns = vec![mode_pattern()];
    patterns.extend(name_patterns());
    patterns.extend(start_mode_patterns());
    patterns.push(sudo_pattern());
    patterns
});

static CATCH_ALL_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(unknown_patterns);

/// Built-in patterns plus whatever the caller registered.
///
/// The tokenizer and resolver are built on first use and reused until the
/// next registration.
#[derive(Debug, Clone, Default)]
pub struct CommandLineGrammar {
    custom: Vec<CustomOption>,
    compiled: OnceCell<(Tokenizer, OptionResolver)>,
}

impl CommandLineGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a switch, matched ignoring case.
    pub fn add_switch(&mut self, name: impl Into<String>) {
        self.custom.push(CustomOption::Switch(name.into()));
        self.compiled = OnceCell::new();
    }

    /// Register a definition, matched case-sensitively.
    pub fn add_definition(&mut self, key: impl Into<String>) {
        self.custom.push(CustomOption::Definition(key.into()));
        self.compiled = OnceCell::new();
    }

    pub fn custom_options(&self) -> &[CustomOption] {
        &self.custom
    }

    /// Keys whose `-key value` form consumes the following token.
    pub fn definition_keys(&self) -> Vec<String> {
        let custom = self.custom.iter().filter_map(|option| match option {
            CustomOption::Definition(key) => Some(key.clone()),
            CustomOption::Switch(_) => None,
        });
        BUILTIN_DEFINITION_KEYS
            .iter()
            .map(|key| key.to_string())
            .chain(custom)
            .collect()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.compiled().0
    }

    /// A resolver with every pattern registered in order.
    pub fn resolver(&self) -> &OptionResolver {
        &self.compiled().1
    }

    fn compiled(&self) -> &(Tokenizer, OptionResolver) {
        self.compiled.get_or_init(|| {
            let tokenizer = Tokenizer::with_definition_keys(self.definition_keys());
            let mut resolver = OptionResolver::new();
            for pattern in BUILTIN_PATTERNS.iter() {
                resolver.register_pattern(pattern.clone());
            }
            for option in &self.custom {
                resolver.register_pattern(custom_pattern(option));
            }
            for pattern in CATCH_ALL_PATTERNS.iter() {
                resolver.register_pattern(pattern.clone());
            }
            (tokenizer, resolver)
        })
    }

    /// Tokenize and resolve `text` in one pass.
    pub fn parse(&self, text: &str) -> Vec<HostOption> {
        let elements = self.tokenizer().elements(text);
        self.resolver().resolve(elements)
    }
}
