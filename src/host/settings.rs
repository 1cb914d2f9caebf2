//! Host settings and derived-name formatting
//!
//! The configurator collects raw values (name, explicit display name, instance
//! name, ...). Once every option has been applied, those values are frozen into
//! a [`HostSettings`] record. This is the only place service and display
//! names are derived:
//!
//! - `service_name` is `name`, or `name$instance` when an instance is set.
//! - `display_name` is the explicit display name, falling back to `name`, with
//!   ` (Instance: <instance>)` appended when an instance is set and the display
//!   name does not already end with exactly that suffix.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How an installed service starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartMode {
    #[default]
    Automatic,
    AutomaticDelayed,
    Manual,
    Disabled,
}

/// Characters a service or display name may not contain.
pub const DISALLOWED_NAME_CHARS: [char; 5] = ['\t', '\r', '\n', '\\', '/'];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `name`, or `name$instance` when `instance` is not empty.
pub fn service_name(name: &str, instance: &str) -> String {
    if instance.is_empty() {
        name.to_string()
    } else {
        format!("{}${}", name, instance)
    }
}

fn instance_suffix(instance: &str) -> Option<String> {
    if instance.is_empty() {
        None
    } else {
        Some(format!(" (Instance: {})", instance))
    }
}

/// The display name shown for a service. Idempotent: formatting an already
/// formatted name leaves it unchanged.
pub fn display_name(name: &str, explicit: Option<&str>, instance: &str) -> String {
    let base = match explicit {
        Some(explicit) if !explicit.is_empty() => explicit,
        _ => name,
    };
    match instance_suffix(instance) {
        Some(suffix) if !base.ends_with(&suffix) => format!("{}{}", base, suffix),
        _ => base.to_string(),
    }
}

/// Final settings handed to the host builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostSettings {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub instance_name: String,
    pub service_name: String,
    #[serde(with = "duration_secs")]
    pub start_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub stop_timeout: Duration,
}

impl HostSettings {
    /// Settings for `name` with every derived field computed.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        HostSettings {
            display_name: name.clone(),
            service_name: name.clone(),
            name,
            description: String::new(),
            instance_name: String::new(),
            start_timeout: DEFAULT_TIMEOUT,
            stop_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the instance name, re-deriving service and display names. The
    /// previous instance suffix is dropped from the display name first.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        let base = instance_suffix(&self.instance_name)
            .and_then(|suffix| self.display_name.strip_suffix(suffix.as_str()))
            .unwrap_or(self.display_name.as_str())
            .to_string();

        self.instance_name = instance.into();
        self.service_name = service_name(&self.name, &self.instance_name);
        self.display_name = display_name(&self.name, Some(&base), &self.instance_name);
        self
    }
}

/// Settings used by the install and uninstall hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSettings {
    #[serde(flatten)]
    pub host: HostSettings,
    pub start_mode: StartMode,
    pub sudo: bool,
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_without_instance() {
        assert_eq!(service_name("Joe", ""), "Joe");
    }

    #[test]
    fn test_service_name_with_instance() {
        assert_eq!(service_name("Joe", "42"), "Joe$42");
        assert_eq!(service_name("Joe's Service", "42"), "Joe's Service$42");
    }

    #[test]
    fn test_display_name_defaults_to_name() {
        assert_eq!(display_name("Joe", None, ""), "Joe");
        assert_eq!(display_name("Joe", Some(""), ""), "Joe");
        assert_eq!(display_name("Joe", Some("Joe Service"), ""), "Joe Service");
    }

    #[test]
    fn test_display_name_instance_suffix() {
        assert_eq!(display_name("Joe", None, "42"), "Joe (Instance: 42)");
    }

    #[test]
    fn test_display_name_suffix_is_idempotent() {
        let once = display_name("Joe", None, "42");
        assert_eq!(display_name("Joe", Some(&once), "42"), "Joe (Instance: 42)");
    }

    #[test]
    fn test_display_name_suffix_must_match_exactly() {
        assert_eq!(
            display_name("Joe", Some("Joe (Instance: 4)"), "42"),
            "Joe (Instance: 4) (Instance: 42)"
        );
    }

    #[test]
    fn test_with_instance_derives_names() {
        let settings = HostSettings::new("Joe").with_instance("42");

        assert_eq!(settings.service_name, "Joe$42");
        assert_eq!(settings.display_name, "Joe (Instance: 42)");
        assert_eq!(settings.with_instance("42").display_name, "Joe (Instance: 42)");
    }

    #[test]
    fn test_with_instance_replaces_previous_suffix() {
        let settings = HostSettings::new("Joe").with_instance("42").with_instance("7");

        assert_eq!(settings.service_name, "Joe$7");
        assert_eq!(settings.display_name, "Joe (Instance: 7)");
        assert_eq!(settings.with_instance("").display_name, "Joe");
    }

    #[test]
    fn test_install_settings_json() {
        let settings = InstallSettings {
            host: HostSettings::new("Joe").with_instance("42"),
            start_mode: StartMode::Manual,
            sudo: true,
        };

        insta::assert_snapshot!(serde_json::to_string_pretty(&settings).unwrap(), @r###"
        {
          "name": "Joe",
          "display_name": "Joe (Instance: 42)",
          "description": "",
          "instance_name": "42",
          "service_name": "Joe$42",
          "start_timeout": 10.0,
          "stop_timeout": 10.0,
          "start_mode": "manual",
          "sudo": true
        }
        "###);
    }

    #[test]
    fn test_start_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&StartMode::AutomaticDelayed).unwrap(),
            r#""automatic-delayed""#
        );
    }
}
