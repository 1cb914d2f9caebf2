//! The operating-system seam
//!
//! Hosts never talk to a service manager directly. Everything they need goes
//! through [`HostEnvironment`], which keeps the hosts testable and lets the
//! binary do a dry run against [`MemoryEnvironment`].

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use log::debug;
use serde::Serialize;

use super::error::EnvironmentError;
use super::settings::{HostSettings, InstallSettings, StartMode};

pub trait HostEnvironment {
    fn is_administrator(&self) -> bool;

    fn is_service_installed(&self, service_name: &str) -> bool;

    /// True when the service is installed and not running.
    fn is_service_stopped(&self, service_name: &str) -> bool;

    fn install_service(&mut self, settings: &InstallSettings) -> Result<(), EnvironmentError>;

    fn uninstall_service(&mut self, settings: &HostSettings) -> Result<(), EnvironmentError>;

    fn start_service(
        &mut self,
        service_name: &str,
        timeout: Duration,
    ) -> Result<(), EnvironmentError>;

    fn stop_service(
        &mut self,
        service_name: &str,
        timeout: Duration,
    ) -> Result<(), EnvironmentError>;

    /// Re-launch the current command elevated. Returns whether the elevated
    /// process was started.
    fn run_as_administrator(&mut self) -> bool;

    /// Block until the environment asks the running service to shut down.
    fn wait_for_shutdown(&mut self);
}

/// A call recorded by [`MemoryEnvironment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "kebab-case")]
pub enum EnvironmentCall {
    Install { service_name: String, start_mode: StartMode },
    Uninstall { service_name: String },
    Start { service_name: String },
    Stop { service_name: String },
    RunAsAdministrator,
    WaitForShutdown,
}

/// In-memory service manager. Installed services map to their running state.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    administrator: bool,
    can_elevate: bool,
    services: HashMap<String, bool>,
    failing: HashSet<String>,
    calls: Vec<EnvironmentCall>,
}

impl MemoryEnvironment {
    /// An environment running as administrator with no services installed.
    pub fn new() -> Self {
        MemoryEnvironment {
            administrator: true,
            ..Default::default()
        }
    }

    /// An unprivileged environment. `can_elevate` decides whether
    /// [`HostEnvironment::run_as_administrator`] succeeds.
    pub fn unprivileged(can_elevate: bool) -> Self {
        MemoryEnvironment {
            administrator: false,
            can_elevate,
            ..Default::default()
        }
    }

    pub fn with_service(mut self, service_name: impl Into<String>, running: bool) -> Self {
        self.services.insert(service_name.into(), running);
        self
    }

    /// Make start and stop requests for `service_name` fail.
    pub fn with_failing_service(mut self, service_name: impl Into<String>) -> Self {
        self.failing.insert(service_name.into());
        self
    }

    pub fn is_running(&self, service_name: &str) -> bool {
        self.services.get(service_name).copied().unwrap_or(false)
    }

    pub fn calls(&self) -> &[EnvironmentCall] {
        &self.calls
    }

    fn set_running(&mut self, service_name: &str, running: bool) -> Result<(), EnvironmentError> {
        if self.failing.contains(service_name) {
            return Err(EnvironmentError::Failed(format!(
                "service '{}' refused the request",
                service_name
            )));
        }
        match self.services.get_mut(service_name) {
            Some(state) => {
                *state = running;
                Ok(())
            }
            None => Err(EnvironmentError::NotInstalled(service_name.to_string())),
        }
    }
}

impl HostEnvironment for MemoryEnvironment {
    fn is_administrator(&self) -> bool {
        self.administrator
    }

    fn is_service_installed(&self, service_name: &str) -> bool {
        self.services.contains_key(service_name)
    }

    fn is_service_stopped(&self, service_name: &str) -> bool {
        self.services.get(service_name) == Some(&false)
    }

    fn install_service(&mut self, settings: &InstallSettings) -> Result<(), EnvironmentError> {
        let service_name = &settings.host.service_name;
        self.calls.push(EnvironmentCall::Install {
            service_name: service_name.clone(),
            start_mode: settings.start_mode,
        });
        if self.services.contains_key(service_name) {
            return Err(EnvironmentError::AlreadyInstalled(service_name.clone()));
        }
        self.services.insert(service_name.clone(), false);
        Ok(())
    }

    fn uninstall_service(&mut self, settings: &HostSettings) -> Result<(), EnvironmentError> {
        self.calls.push(EnvironmentCall::Uninstall {
            service_name: settings.service_name.clone(),
        });
        match self.services.remove(&settings.service_name) {
            Some(_) => Ok(()),
            None => Err(EnvironmentError::NotInstalled(settings.service_name.clone())),
        }
    }

    fn start_service(
        &mut self,
        service_name: &str,
        timeout: Duration,
    ) -> Result<(), EnvironmentError> {
        debug!("Starting '{}' (timeout {:?})", service_name, timeout);
        self.calls.push(EnvironmentCall::Start {
            service_name: service_name.to_string(),
        });
        self.set_running(service_name, true)
    }

    fn stop_service(
        &mut self,
        service_name: &str,
        timeout: Duration,
    ) -> Result<(), EnvironmentError> {
        debug!("Stopping '{}' (timeout {:?})", service_name, timeout);
        self.calls.push(EnvironmentCall::Stop {
            service_name: service_name.to_string(),
        });
        self.set_running(service_name, false)
    }

    fn run_as_administrator(&mut self) -> bool {
        self.calls.push(EnvironmentCall::RunAsAdministrator);
        self.can_elevate
    }

    fn wait_for_shutdown(&mut self) {
        self.calls.push(EnvironmentCall::WaitForShutdown);
    }
}
