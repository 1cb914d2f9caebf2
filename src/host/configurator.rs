//! The configuration surface
//!
//! [`HostConfigurator`] collects raw values from defaults, code and the
//! command line. Names are stored as given. Service and display names are
//! derived once, by [`HostConfigurator::settings`], after every option has
//! been applied.

use std::fmt;
use std::time::Duration;

use log::{debug, info};

use super::builder::HostBuilder;
use super::error::ConfigurationError;
use super::hosts::Host;
use super::mode::{Mode, ModeSelection};
use super::service::{ServiceControl, ServiceFactory};
use super::settings::{
    display_name, service_name, HostSettings, InstallSettings, StartMode, DEFAULT_TIMEOUT,
    DISALLOWED_NAME_CHARS,
};
use crate::cmdline::CommandLineGrammar;
use crate::config::HostDefaults;

type SwitchCallback = Box<dyn FnMut(bool)>;
type DefinitionCallback = Box<dyn FnMut(&str)>;

pub struct HostConfigurator {
    name: String,
    display_name: String,
    description: String,
    instance_name: String,
    start_mode: StartMode,
    sudo: bool,
    start_timeout: Duration,
    stop_timeout: Duration,
    mode: ModeSelection,
    grammar: CommandLineGrammar,
    switch_callbacks: Vec<(String, SwitchCallback)>,
    definition_callbacks: Vec<(String, DefinitionCallback)>,
    service_factory: Option<ServiceFactory>,
    help_text: Option<String>,
}

impl Default for HostConfigurator {
    fn default() -> Self {
        HostConfigurator {
            name: String::new(),
            display_name: String::new(),
            description: String::new(),
            instance_name: String::new(),
            start_mode: StartMode::default(),
            sudo: false,
            start_timeout: DEFAULT_TIMEOUT,
            stop_timeout: DEFAULT_TIMEOUT,
            mode: ModeSelection::new(),
            grammar: CommandLineGrammar::new(),
            switch_callbacks: Vec::new(),
            definition_callbacks: Vec::new(),
            service_factory: None,
            help_text: None,
        }
    }
}

impl HostConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A configurator seeded from loaded defaults.
    pub fn with_defaults(defaults: &HostDefaults) -> Self {
        HostConfigurator {
            name: defaults.name.clone(),
            display_name: defaults.display_name.clone(),
            description: defaults.description.clone(),
            instance_name: defaults.instance_name.clone(),
            start_mode: defaults.start_mode,
            start_timeout: defaults.start_timeout(),
            stop_timeout: defaults.stop_timeout(),
            ..Self::default()
        }
    }

    pub fn set_service_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the display name. Empty means "use the service name".
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_instance_name(&mut self, instance: impl Into<String>) {
        self.instance_name = instance.into();
    }

    /// Only the install host uses the start mode.
    pub fn set_start_mode(&mut self, start_mode: StartMode) {
        self.start_mode = start_mode;
    }

    pub fn enable_sudo(&mut self) {
        self.sudo = true;
    }

    pub fn set_start_timeout(&mut self, timeout: Duration) {
        self.start_timeout = timeout;
    }

    pub fn set_stop_timeout(&mut self, timeout: Duration) {
        self.stop_timeout = timeout;
    }

    /// Text shown above the usage reference by the help host.
    pub fn set_help_text(&mut self, text: impl Into<String>) {
        self.help_text = Some(text.into());
    }

    pub fn service<F>(&mut self, factory: F)
    where
        F: Fn(&HostSettings) -> Box<dyn ServiceControl> + 'static,
    {
        self.service_factory = Some(Box::new(factory));
    }

    /// Register `--name`, matched ignoring case. `callback` receives `true`
    /// each time the switch appears and is never called otherwise.
    pub fn add_command_line_switch<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        let name = name.into();
        self.grammar.add_switch(name.clone());
        self.switch_callbacks.push((name, Box::new(callback)));
    }

    /// Register `-key:value` / `-key value`, matched case-sensitively.
    pub fn add_command_line_definition<F>(&mut self, key: impl Into<String>, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        let key = key.into();
        self.grammar.add_definition(key.clone());
        self.definition_callbacks.push((key, Box::new(callback)));
    }

    pub fn grammar(&self) -> &CommandLineGrammar {
        &self.grammar
    }

    /// Select the host mode. Only the first selection takes effect.
    pub fn select_mode(&mut self, mode: Mode) -> bool {
        self.mode.select(mode)
    }

    /// The mode the host will run in: `Run` until something else is selected.
    pub fn mode(&self) -> Mode {
        self.mode.resolved()
    }

    pub fn invoke_switch(&mut self, name: &str, value: bool) {
        if let Some((_, callback)) = self.switch_callbacks.iter_mut().find(|(key, _)| key == name) {
            debug!("Invoking switch callback '{}' with {}", name, value);
            callback(value);
        }
    }

    pub fn invoke_definition(&mut self, key: &str, value: &str) {
        if let Some((_, callback)) = self.definition_callbacks.iter_mut().find(|(k, _)| k == key) {
            debug!("Invoking definition callback '{}'", key);
            callback(value);
        }
    }

    /// Tokenize, resolve and apply `text`.
    ///
    /// Options are applied in order. On error the configurator may hold the
    /// options applied before the failing one and should be discarded.
    pub fn apply_command_line(&mut self, text: &str) -> Result<(), ConfigurationError> {
        let options = self.grammar.parse(text);
        for option in options {
            debug!("Applying {:?}", option);
            option.apply_to(self)?;
        }
        info!("Selected mode '{}'", self.mode());
        Ok(())
    }

    /// Freeze the collected values, deriving service and display names.
    pub fn settings(&self) -> HostSettings {
        HostSettings {
            name: self.name.clone(),
            display_name: display_name(
                &self.name,
                Some(&self.display_name),
                &self.instance_name,
            ),
            description: self.description.clone(),
            instance_name: self.instance_name.clone(),
            service_name: service_name(&self.name, &self.instance_name),
            start_timeout: self.start_timeout,
            stop_timeout: self.stop_timeout,
        }
    }

    pub fn install_settings(&self) -> InstallSettings {
        InstallSettings {
            host: self.settings(),
            start_mode: self.start_mode,
            sudo: self.sudo,
        }
    }

    /// Check the configuration can produce a host.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.is_empty() {
            return Err(ConfigurationError::MissingName);
        }
        let settings = self.settings();
        check_name("Name", &settings.name)?;
        check_name("DisplayName", &settings.display_name)?;
        if self.service_factory.is_none() {
            return Err(ConfigurationError::MissingServiceFactory);
        }
        Ok(())
    }

    /// Validate and build the host for the selected mode.
    pub fn build(self) -> Result<Host, ConfigurationError> {
        self.validate()?;
        let settings = self.settings();
        info!(
            "Configured '{}' ({}) for {}",
            settings.service_name,
            settings.display_name,
            self.mode()
        );
        HostBuilder::new(self.mode(), settings)
            .start_mode(self.start_mode)
            .sudo(self.sudo)
            .help(self.help_text, self.grammar.custom_options().to_vec())
            .build(self.service_factory.as_ref())
    }
}

fn check_name(field: &'static str, value: &str) -> Result<(), ConfigurationError> {
    if value.contains(|c| DISALLOWED_NAME_CHARS.contains(&c)) {
        return Err(ConfigurationError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl fmt::Debug for HostConfigurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfigurator")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("description", &self.description)
            .field("instance_name", &self.instance_name)
            .field("start_mode", &self.start_mode)
            .field("sudo", &self.sudo)
            .field("mode", &self.mode)
            .field("grammar", &self.grammar)
            .field("has_service", &self.service_factory.is_some())
            .finish_non_exhaustive()
    }
}
