//! # shelfhost
//!
//! Command-line interpretation for service hosts.
//!
//! A service executable is invoked with a mode keyword and options:
//!
//! ```text
//! myservice install -servicename Joe -instance 42 --manual
//! ```
//!
//! This crate turns that invocation string into a selected [`host::Mode`] plus
//! configured [`host::HostSettings`], and builds the host that acts on it.
//!
//! - [`cmdline`]: the parser-combinator library, tokenizer, element matchers
//!   and option resolver.
//! - [`host`]: the configuration surface, mode selection, settings and the
//!   hosts built from them.
//! - [`config`]: layered defaults (embedded defaults, a user file, overrides).

pub mod cmdline;
pub mod config;
pub mod host;
