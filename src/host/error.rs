//! Error types for host configuration and the service environment

/// Raised while turning configuration and an invocation string into a host.
/// Any of these abandons the whole configuration attempt.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown command-line argument: {0}")]
    UnknownCommand(String),
    #[error("no service factory was registered")]
    MissingServiceFactory,
    #[error("a service name must be specified and not empty")]
    MissingName,
    #[error("{field} '{value}' must not contain tab, CR, LF, '/' or '\\' characters")]
    InvalidName { field: &'static str, value: String },
    #[error("argument cannot be quoted without escapes: {0}")]
    UnquotableArgument(String),
    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

/// Failure reported by a [`HostEnvironment`](super::environment::HostEnvironment).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("service '{0}' is not installed")]
    NotInstalled(String),
    #[error("service '{0}' is already installed")]
    AlreadyInstalled(String),
    #[error("service '{service}' did not reach the {state} state in time")]
    Timeout { service: String, state: &'static str },
    #[error("{0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        ConfigurationError::UnknownCommand("explode".into()),
        "unknown command-line argument: explode"
    )]
    #[case(
        ConfigurationError::MissingServiceFactory,
        "no service factory was registered"
    )]
    #[case(
        ConfigurationError::InvalidName { field: "Name", value: "a/b".into() },
        "Name 'a/b' must not contain tab, CR, LF, '/' or '\\' characters"
    )]
    fn test_configuration_error_display(#[case] error: ConfigurationError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_environment_error_display() {
        let error = EnvironmentError::Timeout {
            service: "Joe$42".into(),
            state: "running",
        };
        assert_eq!(
            error.to_string(),
            "service 'Joe$42' did not reach the running state in time"
        );
    }
}
