//! Process exit codes reported by a host run

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitCode {
    Ok,
    AbnormalExit,
    SudoRequired,
    ServiceAlreadyInstalled,
    ServiceNotInstalled,
    StartServiceFailed,
    StopServiceFailed,
    ServiceAlreadyRunning,
    UnhandledServiceException,
    ServiceNotRunning,
    SendCommandFailed,
}

impl ExitCode {
    /// Numeric process status.
    pub fn code(self) -> u8 {
        match self {
            ExitCode::Ok => 0,
            ExitCode::AbnormalExit => 1,
            ExitCode::SudoRequired => 2,
            ExitCode::ServiceAlreadyInstalled => 3,
            ExitCode::ServiceNotInstalled => 4,
            ExitCode::StartServiceFailed => 5,
            ExitCode::StopServiceFailed => 6,
            ExitCode::ServiceAlreadyRunning => 7,
            ExitCode::UnhandledServiceException => 8,
            ExitCode::ServiceNotRunning => 9,
            ExitCode::SendCommandFailed => 10,
        }
    }

    pub fn is_ok(self) -> bool {
        self == ExitCode::Ok
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}
