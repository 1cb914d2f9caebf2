//! Host configuration and runtime
//!
//! [`HostConfigurator`] is the configuration surface the command line is
//! applied to. Once configured, it builds one [`Host`] per [`Mode`]; running a
//! host against a [`HostEnvironment`] yields an [`ExitCode`].

pub mod builder;
pub mod configurator;
pub mod environment;
pub mod error;
pub mod exit_code;
pub mod hosts;
pub mod mode;
pub mod service;
pub mod settings;

pub use builder::HostBuilder;
pub use configurator::HostConfigurator;
pub use environment::{EnvironmentCall, HostEnvironment, MemoryEnvironment};
pub use error::{ConfigurationError, EnvironmentError};
pub use exit_code::ExitCode;
pub use hosts::Host;
pub use mode::{Mode, ModeSelection, MODE_KEYWORDS};
pub use service::{DelegateService, ServiceControl, ServiceFactory};
pub use settings::{HostSettings, InstallSettings, StartMode};
