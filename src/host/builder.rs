//! Host builder keyed on the selected mode

use super::error::ConfigurationError;
use super::hosts::{
    HelpHost, Host, InstallHost, RunHost, StartHost, StopHost, TestHost, UninstallHost,
};
use super::mode::Mode;
use super::service::ServiceFactory;
use super::settings::{HostSettings, InstallSettings, StartMode};
use crate::cmdline::CustomOption;

/// Everything a host of any mode may need. Each mode takes only its part.
#[derive(Debug, Clone)]
pub struct HostBuilder {
    mode: Mode,
    settings: HostSettings,
    start_mode: StartMode,
    sudo: bool,
    help_text: Option<String>,
    custom: Vec<CustomOption>,
}

impl HostBuilder {
    /// An `Unselected` mode builds the run host.
    pub fn new(mode: Mode, settings: HostSettings) -> Self {
        HostBuilder {
            mode,
            settings,
            start_mode: StartMode::default(),
            sudo: false,
            help_text: None,
            custom: Vec::new(),
        }
    }

    pub fn start_mode(mut self, start_mode: StartMode) -> Self {
        self.start_mode = start_mode;
        self
    }

    pub fn sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    pub fn help(mut self, prefix: Option<String>, custom: Vec<CustomOption>) -> Self {
        self.help_text = prefix;
        self.custom = custom;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn build(self, factory: Option<&ServiceFactory>) -> Result<Host, ConfigurationError> {
        let host = match self.mode {
            Mode::Install => Host::Install(InstallHost {
                settings: InstallSettings {
                    host: self.settings,
                    start_mode: self.start_mode,
                    sudo: self.sudo,
                },
            }),
            Mode::Uninstall => Host::Uninstall(UninstallHost {
                settings: self.settings,
                sudo: self.sudo,
            }),
            Mode::Start => Host::Start(StartHost {
                settings: self.settings,
                sudo: self.sudo,
            }),
            Mode::Stop => Host::Stop(StopHost {
                settings: self.settings,
                sudo: self.sudo,
            }),
            Mode::Help => Host::Help(HelpHost {
                settings: self.settings,
                prefix: self.help_text,
                custom: self.custom,
            }),
            Mode::Test => {
                let factory = factory.ok_or(ConfigurationError::MissingServiceFactory)?;
                let service = factory(&self.settings);
                Host::Test(TestHost::new(self.settings, service))
            }
            Mode::Run | Mode::Unselected => {
                let factory = factory.ok_or(ConfigurationError::MissingServiceFactory)?;
                let service = factory(&self.settings);
                Host::Run(RunHost::new(self.settings, service))
            }
        };
        Ok(host)
    }
}
