//! Resolved command-line options
//!
//! Each [`HostOption`] is a typed instruction produced by a pattern. Applying
//! it to a [`HostConfigurator`] mutates the configuration surface in place.

use log::warn;
use serde::Serialize;

use crate::host::{ConfigurationError, HostConfigurator, Mode, StartMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "option", content = "value", rename_all = "kebab-case")]
pub enum HostOption {
    /// Leading mode keyword.
    Mode(Mode),
    /// Leading argument that is not a mode keyword.
    UnknownCommand(String),
    ServiceName(String),
    DisplayName(String),
    InstanceName(String),
    Description(String),
    StartMode(StartMode),
    Sudo,
    CustomSwitch { name: String, value: bool },
    CustomDefinition { name: String, value: String },
    /// Switch or definition no pattern claimed.
    Unknown(String),
}

impl HostOption {
    /// Apply this option to the configuration surface.
    ///
    /// Only [`HostOption::UnknownCommand`] fails. A second mode selection is
    /// ignored, and unknown options are logged and dropped.
    pub fn apply_to(self, configurator: &mut HostConfigurator) -> Result<(), ConfigurationError> {
        match self {
            HostOption::Mode(mode) => {
                if !configurator.select_mode(mode) {
                    warn!(
                        "Ignoring mode '{}': '{}' was already selected",
                        mode,
                        configurator.mode()
                    );
                }
            }
            HostOption::UnknownCommand(text) => {
                return Err(ConfigurationError::UnknownCommand(text));
            }
            HostOption::ServiceName(name) => configurator.set_service_name(name),
            HostOption::DisplayName(name) => configurator.set_display_name(name),
            HostOption::InstanceName(name) => configurator.set_instance_name(name),
            HostOption::Description(text) => configurator.set_description(text),
            HostOption::StartMode(mode) => configurator.set_start_mode(mode),
            HostOption::Sudo => configurator.enable_sudo(),
            HostOption::CustomSwitch { name, value } => configurator.invoke_switch(&name, value),
            HostOption::CustomDefinition { name, value } => {
                configurator.invoke_definition(&name, &value)
            }
            HostOption::Unknown(text) => warn!("Ignoring unknown command-line option {}", text),
        }
        Ok(())
    }
}
