//! Built hosts, one per mode
//!
//! Every host runs against a [`HostEnvironment`] and reports an [`ExitCode`].
//! Hosts that change the service manager (install, uninstall, start, stop)
//! require administrator rights; with `--sudo` they ask the environment to
//! re-launch elevated instead of failing.

use std::fmt;

use log::{debug, error, info};

use super::environment::HostEnvironment;
use super::exit_code::ExitCode;
use super::mode::Mode;
use super::service::ServiceControl;
use super::settings::{HostSettings, InstallSettings};
use crate::cmdline::CustomOption;

#[derive(Debug)]
pub enum Host {
    Install(InstallHost),
    Uninstall(UninstallHost),
    Start(StartHost),
    Stop(StopHost),
    Run(RunHost),
    Test(TestHost),
    Help(HelpHost),
}

impl Host {
    pub fn mode(&self) -> Mode {
        match self {
            Host::Install(_) => Mode::Install,
            Host::Uninstall(_) => Mode::Uninstall,
            Host::Start(_) => Mode::Start,
            Host::Stop(_) => Mode::Stop,
            Host::Run(_) => Mode::Run,
            Host::Test(_) => Mode::Test,
            Host::Help(_) => Mode::Help,
        }
    }

    pub fn settings(&self) -> &HostSettings {
        match self {
            Host::Install(host) => &host.settings.host,
            Host::Uninstall(host) => &host.settings,
            Host::Start(host) => &host.settings,
            Host::Stop(host) => &host.settings,
            Host::Run(host) => &host.settings,
            Host::Test(host) => &host.settings,
            Host::Help(host) => &host.settings,
        }
    }

    pub fn run(&mut self, env: &mut dyn HostEnvironment) -> ExitCode {
        info!("Running {} host for '{}'", self.mode(), self.settings().service_name);
        let code = match self {
            Host::Install(host) => host.run(env),
            Host::Uninstall(host) => host.run(env),
            Host::Start(host) => host.run(env),
            Host::Stop(host) => host.run(env),
            Host::Run(host) => host.run(env),
            Host::Test(host) => host.run(env),
            Host::Help(host) => host.run(),
        };
        if !code.is_ok() {
            error!("{} host finished with {}", self.mode(), code);
        }
        code
    }
}

/// `None` when the environment is privileged. Otherwise the exit code to
/// return: `Ok` if an elevated re-launch was started, `SudoRequired` if not.
fn require_administrator(
    env: &mut dyn HostEnvironment,
    sudo: bool,
    action: &str,
    service_name: &str,
) -> Option<ExitCode> {
    if env.is_administrator() {
        return None;
    }
    if sudo && env.run_as_administrator() {
        info!("Re-launched elevated to {} '{}'", action, service_name);
        return Some(ExitCode::Ok);
    }
    error!(
        "The '{}' service can only be {} by an administrator",
        service_name, action
    );
    Some(ExitCode::SudoRequired)
}

#[derive(Debug, Clone)]
pub struct InstallHost {
    pub settings: InstallSettings,
}

impl InstallHost {
    pub fn run(&self, env: &mut dyn HostEnvironment) -> ExitCode {
        let service_name = &self.settings.host.service_name;
        if env.is_service_installed(service_name) {
            error!("The '{}' service is already installed", service_name);
            return ExitCode::ServiceAlreadyInstalled;
        }
        let sudo = self.settings.sudo;
        if let Some(code) = require_administrator(env, sudo, "installed", service_name) {
            return code;
        }

        debug!("Installing '{}' ({:?})", service_name, self.settings.start_mode);
        match env.install_service(&self.settings) {
            Ok(()) => ExitCode::Ok,
            Err(err) => {
                error!("Install failed: {}", err);
                ExitCode::AbnormalExit
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UninstallHost {
    pub settings: HostSettings,
    pub sudo: bool,
}

impl UninstallHost {
    pub fn run(&self, env: &mut dyn HostEnvironment) -> ExitCode {
        let service_name = &self.settings.service_name;
        if !env.is_service_installed(service_name) {
            error!("The '{}' service is not installed", service_name);
            return ExitCode::ServiceNotInstalled;
        }
        if let Some(code) = require_administrator(env, self.sudo, "uninstalled", service_name) {
            return code;
        }

        match env.uninstall_service(&self.settings) {
            Ok(()) => ExitCode::Ok,
            Err(err) => {
                error!("Uninstall failed: {}", err);
                ExitCode::AbnormalExit
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StartHost {
    pub settings: HostSettings,
    pub sudo: bool,
}

impl StartHost {
    pub fn run(&self, env: &mut dyn HostEnvironment) -> ExitCode {
        let service_name = &self.settings.service_name;
        if !env.is_service_installed(service_name) {
            error!("The '{}' service is not installed", service_name);
            return ExitCode::ServiceNotInstalled;
        }
        if !env.is_service_stopped(service_name) {
            info!("The '{}' service is already running", service_name);
            return ExitCode::ServiceAlreadyRunning;
        }
        if let Some(code) = require_administrator(env, self.sudo, "started", service_name) {
            return code;
        }

        match env.start_service(service_name, self.settings.start_timeout) {
            Ok(()) => {
                info!("The '{}' service was started", service_name);
                ExitCode::Ok
            }
            Err(err) => {
                error!("Start failed: {}", err);
                ExitCode::StartServiceFailed
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StopHost {
    pub settings: HostSettings,
    pub sudo: bool,
}

impl StopHost {
    pub fn run(&self, env: &mut dyn HostEnvironment) -> ExitCode {
        let service_name = &self.settings.service_name;
        if !env.is_service_installed(service_name) {
            error!("The '{}' service is not installed", service_name);
            return ExitCode::ServiceNotInstalled;
        }
        if env.is_service_stopped(service_name) {
            info!("The '{}' service is not running", service_name);
            return ExitCode::ServiceNotRunning;
        }
        if let Some(code) = require_administrator(env, self.sudo, "stopped", service_name) {
            return code;
        }

        match env.stop_service(service_name, self.settings.stop_timeout) {
            Ok(()) => {
                info!("The '{}' service was stopped", service_name);
                ExitCode::Ok
            }
            Err(err) => {
                error!("Stop failed: {}", err);
                ExitCode::StopServiceFailed
            }
        }
    }
}

/// Runs the service in the foreground until the environment shuts it down.
pub struct RunHost {
    pub settings: HostSettings,
    service: Box<dyn ServiceControl>,
}

impl RunHost {
    pub fn new(settings: HostSettings, service: Box<dyn ServiceControl>) -> Self {
        RunHost { settings, service }
    }

    pub fn run(&mut self, env: &mut dyn HostEnvironment) -> ExitCode {
        let service_name = &self.settings.service_name;
        if env.is_service_installed(service_name) && !env.is_service_stopped(service_name) {
            error!(
                "The '{}' service is already running under the service manager",
                service_name
            );
            return ExitCode::ServiceAlreadyRunning;
        }

        if !self.service.start() {
            error!("The '{}' service failed to start", service_name);
            return ExitCode::StartServiceFailed;
        }
        info!("The '{}' service is running", service_name);

        env.wait_for_shutdown();

        if !self.service.stop() {
            error!("The '{}' service failed to stop", service_name);
            return ExitCode::StopServiceFailed;
        }
        ExitCode::Ok
    }
}

impl fmt::Debug for RunHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunHost").field("settings", &self.settings).finish_non_exhaustive()
    }
}

/// Starts the service and stops it again right away.
pub struct TestHost {
    pub settings: HostSettings,
    service: Box<dyn ServiceControl>,
}

impl TestHost {
    pub fn new(settings: HostSettings, service: Box<dyn ServiceControl>) -> Self {
        TestHost { settings, service }
    }

    pub fn run(&mut self, _env: &mut dyn HostEnvironment) -> ExitCode {
        let service_name = &self.settings.service_name;
        if !self.service.start() {
            error!("The '{}' service failed to start", service_name);
            return ExitCode::StartServiceFailed;
        }
        if !self.service.stop() {
            error!("The '{}' service failed to stop", service_name);
            return ExitCode::StopServiceFailed;
        }
        info!("The '{}' service started and stopped", service_name);
        ExitCode::Ok
    }
}

impl fmt::Debug for TestHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestHost").field("settings", &self.settings).finish_non_exhaustive()
    }
}

const VERBS: [(&str, &str); 8] = [
    ("run", "Run the service in the foreground (default)"),
    ("console", "Same as run"),
    ("test", "Start the service, then stop it right away"),
    ("help", "Show this help"),
    ("install", "Install the service"),
    ("uninstall", "Uninstall the service"),
    ("start", "Start the installed service"),
    ("stop", "Stop the running service"),
];

const OPTIONS: [(&str, &str); 9] = [
    ("-servicename", "Service name"),
    ("-instance", "Instance name, appended to the service name"),
    ("-displayname", "Display name"),
    ("-description", "Description"),
    ("--autostart", "Start automatically (install default)"),
    ("--delayed", "Start automatically after a delay"),
    ("--manual", "Start manually"),
    ("--disabled", "Install disabled"),
    ("--sudo", "Re-launch elevated when not an administrator"),
];

#[derive(Debug, Clone)]
pub struct HelpHost {
    pub settings: HostSettings,
    pub prefix: Option<String>,
    pub custom: Vec<CustomOption>,
}

impl HelpHost {
    /// Usage text: caller prefix, verbs, built-in options, then the
    /// caller-registered switches and definitions.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(prefix) = &self.prefix {
            lines.push(prefix.clone());
            lines.push(String::new());
        }
        lines.push("Usage: <service> [verb] [-option:value] [--switch]".to_string());
        lines.push(String::new());
        lines.push("Verbs:".to_string());
        lines.extend(VERBS.iter().map(|(verb, text)| format!("  {:<16}{}", verb, text)));
        lines.push(String::new());
        lines.push("Options:".to_string());
        lines.extend(OPTIONS.iter().map(|(option, text)| format!("  {:<16}{}", option, text)));
        if !self.custom.is_empty() {
            lines.push(String::new());
            lines.push("Custom options:".to_string());
            lines.extend(self.custom.iter().map(|option| match option {
                CustomOption::Switch(name) => format!("  --{}", name),
                CustomOption::Definition(key) => format!("  -{}:<value>", key),
            }));
        }
        lines.join("\n")
    }

    pub fn run(&self) -> ExitCode {
        println!("{}", self.render());
        ExitCode::Ok
    }
}
