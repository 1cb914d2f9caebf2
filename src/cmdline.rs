//! Command-line interpretation
//!
//! The pipeline runs in three steps:
//!
//! ```text
//! raw text --Tokenizer--> elements --OptionResolver--> options
//!          --HostConfigurator--> mode + settings
//! ```
//!
//! - [`combinators`] and [`cursor`]: a small, total parser-combinator library over
//!   immutable cursors (characters or elements).
//! - [`tokenizer`] and [`elements`]: the raw text becomes `Argument`, `Switch` and
//!   `Definition` elements.
//! - [`matchers`]: element-level parsers (named switch, named definition, argument
//!   predicates, existing-directory argument).
//! - [`resolver`]: ordered first-match pattern resolution.
//! - [`grammar`] and [`options`]: the built-in patterns and the options they produce.
//!
//! Applying options and selecting the mode is the job of
//! [`HostConfigurator`](crate::host::HostConfigurator).

pub mod combinators;
pub mod cursor;
pub mod elements;
pub mod grammar;
pub mod matchers;
pub mod options;
pub mod resolver;
pub mod tokenizer;

pub use combinators::{ParseOutcome, Parser};
pub use cursor::{Cursor, ElementCursor, StrCursor};
pub use elements::CommandLineElement;
pub use grammar::{CommandLineGrammar, CustomOption};
pub use options::HostOption;
pub use resolver::{OptionResolver, Pattern};
pub use tokenizer::{SpannedElement, Tokenizer};

use crate::host::ConfigurationError;

/// Strip the program path from a full process command line.
///
/// Accepts the path verbatim or wrapped in double quotes. When the line does
/// not start with either form it is returned unchanged.
pub fn unparsed_command_line<'a>(line: &'a str, program: &str) -> &'a str {
    if line == program {
        return "";
    }
    if let Some(rest) = line.strip_prefix(program) {
        return rest;
    }
    let quoted = format!("\"{}\"", program);
    line.strip_prefix(quoted.as_str()).unwrap_or(line)
}

/// Join already-split arguments back into one invocation string, quoting any
/// argument that contains whitespace or is empty.
///
/// The tokenizer has no escape syntax, so an argument that would need quotes
/// and contains `"`, or whose value starts with `"`, cannot survive the round
/// trip. Such arguments are rejected with
/// [`ConfigurationError::UnquotableArgument`].
pub fn join_args<I, S>(args: I) -> Result<String, ConfigurationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted = args
        .into_iter()
        .map(|arg| quote_arg(arg.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(" "))
}

fn quote_arg(arg: &str) -> Result<String, ConfigurationError> {
    let (prefix, value) = match arg.split_once(':') {
        Some((key, value)) if arg.starts_with('-') => (format!("{}:", key), value),
        _ => (String::new(), arg),
    };
    let needs_quotes =
        value.contains(|c: char| c == ' ' || c == '\t') || (prefix.is_empty() && value.is_empty());
    if value.starts_with('"') || (needs_quotes && value.contains('"')) {
        return Err(ConfigurationError::UnquotableArgument(arg.to_string()));
    }
    if needs_quotes {
        Ok(format!("{}\"{}\"", prefix, value))
    } else {
        Ok(arg.to_string())
    }
}
