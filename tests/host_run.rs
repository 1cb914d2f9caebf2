//! Configured hosts run against the in-memory service manager

use std::cell::RefCell;
use std::rc::Rc;

use shelfhost::config::Loader;
use shelfhost::host::{
    DelegateService, EnvironmentCall, ExitCode, HostConfigurator, HostEnvironment,
    MemoryEnvironment, StartMode,
};

fn run(command_line: &str, env: &mut MemoryEnvironment) -> ExitCode {
    let mut configurator = HostConfigurator::new();
    configurator.set_service_name("Joe");
    configurator.service(|_| Box::new(DelegateService::new(|| true, || true)));
    configurator.apply_command_line(command_line).unwrap();
    configurator.build().unwrap().run(env)
}

#[test]
fn test_install_start_stop_uninstall_cycle() {
    let mut env = MemoryEnvironment::new();

    assert_eq!(run("install -instance 42 --delayed", &mut env), ExitCode::Ok);
    assert_eq!(run("install -instance 42", &mut env), ExitCode::ServiceAlreadyInstalled);
    assert_eq!(run("start -instance 42", &mut env), ExitCode::Ok);
    assert!(env.is_running("Joe$42"));
    assert_eq!(run("stop -instance 42", &mut env), ExitCode::Ok);
    assert_eq!(run("uninstall -instance 42", &mut env), ExitCode::Ok);
    assert_eq!(run("uninstall -instance 42", &mut env), ExitCode::ServiceNotInstalled);

    assert_eq!(
        env.calls(),
        &[
            EnvironmentCall::Install {
                service_name: "Joe$42".into(),
                start_mode: StartMode::AutomaticDelayed
            },
            EnvironmentCall::Start {
                service_name: "Joe$42".into()
            },
            EnvironmentCall::Stop {
                service_name: "Joe$42".into()
            },
            EnvironmentCall::Uninstall {
                service_name: "Joe$42".into()
            },
        ]
    );
}

#[test]
fn test_start_and_stop_missing_service() {
    let mut env = MemoryEnvironment::new();

    assert_eq!(run("start", &mut env), ExitCode::ServiceNotInstalled);
    assert_eq!(run("stop", &mut env), ExitCode::ServiceNotInstalled);
}

#[test]
fn test_unprivileged_install() {
    let mut env = MemoryEnvironment::unprivileged(true);
    assert_eq!(run("install", &mut env), ExitCode::SudoRequired);
    assert_eq!(run("install --sudo", &mut env), ExitCode::Ok);
    assert_eq!(env.calls(), &[EnvironmentCall::RunAsAdministrator]);
}

#[test]
fn test_run_starts_and_stops_the_service() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let on_start = events.clone();
    let on_stop = events.clone();

    let mut configurator = HostConfigurator::new();
    configurator.set_service_name("Joe");
    configurator.service(move |settings| {
        let started = (on_start.clone(), settings.service_name.clone());
        let stopped = on_stop.clone();
        Box::new(DelegateService::new(
            move || {
                started.0.borrow_mut().push(format!("start {}", started.1));
                true
            },
            move || {
                stopped.borrow_mut().push("stop".to_string());
                true
            },
        ))
    });
    configurator.apply_command_line("console -instance 7").unwrap();
    let mut env = MemoryEnvironment::new();

    assert_eq!(configurator.build().unwrap().run(&mut env), ExitCode::Ok);
    assert_eq!(*events.borrow(), vec!["start Joe$7", "stop"]);
    assert_eq!(env.calls(), &[EnvironmentCall::WaitForShutdown]);
}

#[test]
fn test_defaults_file_then_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("service.toml");
    std::fs::write(
        &path,
        "name = \"FromFile\"\ndescription = \"Loaded\"\nstart_mode = \"disabled\"\n",
    )
    .unwrap();
    let defaults = Loader::new().with_file(&path).build().unwrap();

    let mut configurator = HostConfigurator::with_defaults(&defaults);
    configurator.service(|_| Box::new(DelegateService::new(|| true, || true)));
    configurator.apply_command_line("install --manual").unwrap();
    let settings = configurator.install_settings();

    assert_eq!(settings.host.name, "FromFile");
    assert_eq!(settings.host.description, "Loaded");
    assert_eq!(settings.start_mode, StartMode::Manual);

    let mut env = MemoryEnvironment::new();
    assert_eq!(configurator.build().unwrap().run(&mut env), ExitCode::Ok);
    assert!(env.is_service_installed("FromFile"));
}
