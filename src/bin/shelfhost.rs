//! Command-line interface for shelfhost
//! Interprets a service invocation and reports the selected mode and settings.
//!
//! Usage:
//!   shelfhost [--config `<file>`] [--name `<name>`] [--format json|text] [--execute]
//!             -- `<invocation>`...
//!
//! Example:
//!   shelfhost --name Joe -- install -instance 42 --manual

use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use serde::Serialize;

use shelfhost::cmdline::{join_args, HostOption};
use shelfhost::config::Loader;
use shelfhost::host::{
    ConfigurationError, DelegateService, ExitCode, HostConfigurator, InstallSettings,
    MemoryEnvironment, Mode, ServiceControl,
};

#[derive(Debug, Serialize)]
struct Report {
    mode: Mode,
    options: Vec<HostOption>,
    settings: InstallSettings,
}

fn main() -> process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("shelfhost")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interpret a service-host command line")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .help("Service name used when the invocation does not set one"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("execute")
                .long("execute")
                .help("Run the built host against an in-memory service manager")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("invocation")
                .help("The service command line, e.g. install -servicename Joe --manual")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
        .get_matches();

    match handle_invocation(&matches) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::ExitCode::from(ExitCode::AbnormalExit.code())
        }
    }
}

fn handle_invocation(matches: &ArgMatches) -> Result<ExitCode, ConfigurationError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(name) = matches.get_one::<String>("name") {
        loader = loader.set_override("name", name.as_str())?;
    }
    let defaults = loader.build()?;

    let invocation = join_args(
        matches
            .get_many::<String>("invocation")
            .into_iter()
            .flatten(),
    )?;
    info!("Interpreting '{}'", invocation);

    let mut configurator = HostConfigurator::with_defaults(&defaults);
    configurator.service(|settings| -> Box<dyn ServiceControl> {
        let started = settings.service_name.clone();
        let stopped = settings.service_name.clone();
        Box::new(DelegateService::new(
            move || {
                info!("'{}' started", started);
                true
            },
            move || {
                info!("'{}' stopped", stopped);
                true
            },
        ))
    });
    let options = configurator.grammar().parse(&invocation);
    configurator.apply_command_line(&invocation)?;

    let report = Report {
        mode: configurator.mode(),
        options,
        settings: configurator.install_settings(),
    };
    let mut host = configurator.build()?;

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    match format {
        "json" => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                return Ok(ExitCode::AbnormalExit);
            }
        },
        _ => print!("{}", render_text(&report)),
    }

    if !matches.get_flag("execute") {
        return Ok(ExitCode::Ok);
    }
    let mut env = MemoryEnvironment::new();
    let code = host.run(&mut env);
    println!("exit: {}", code);
    Ok(code)
}

fn render_text(report: &Report) -> String {
    let settings = &report.settings.host;
    let mut out = String::new();
    out.push_str(&format!("mode:          {}\n", report.mode));
    out.push_str(&format!("name:          {}\n", settings.name));
    out.push_str(&format!("service name:  {}\n", settings.service_name));
    out.push_str(&format!("display name:  {}\n", settings.display_name));
    out.push_str(&format!("description:   {}\n", settings.description));
    out.push_str(&format!("instance:      {}\n", settings.instance_name));
    out.push_str(&format!("start mode:    {:?}\n", report.settings.start_mode));
    out.push_str(&format!("sudo:          {}\n", report.settings.sudo));
    out.push_str(&format!(
        "timeouts:      start {}s, stop {}s\n",
        settings.start_timeout.as_secs(),
        settings.stop_timeout.as_secs()
    ));
    for option in &report.options {
        out.push_str(&format!("option:        {:?}\n", option));
    }
    out
}
