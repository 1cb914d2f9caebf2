//! Host modes and the selection state machine

use serde::Serialize;
use std::fmt;

/// What the host does once configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Unselected,
    Install,
    Uninstall,
    Start,
    Stop,
    Run,
    Help,
    Test,
}

/// Mode keywords accepted as the leading argument, matched ignoring case.
pub const MODE_KEYWORDS: &[(&str, Mode)] = &[
    ("install", Mode::Install),
    ("uninstall", Mode::Uninstall),
    ("start", Mode::Start),
    ("stop", Mode::Stop),
    ("run", Mode::Run),
    ("console", Mode::Run),
    ("help", Mode::Help),
    ("debug", Mode::Test),
    ("test", Mode::Test),
];

impl Mode {
    pub fn from_keyword(word: &str) -> Option<Mode> {
        MODE_KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(word))
            .map(|(_, mode)| *mode)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Unselected => "unselected",
            Mode::Install => "install",
            Mode::Uninstall => "uninstall",
            Mode::Start => "start",
            Mode::Stop => "stop",
            Mode::Run => "run",
            Mode::Help => "help",
            Mode::Test => "test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transition out of `Unselected`, then frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeSelection {
    state: Mode,
}

impl ModeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `mode` if nothing was selected yet. Returns whether the
    /// selection took effect; later selections are ignored.
    pub fn select(&mut self, mode: Mode) -> bool {
        if self.state != Mode::Unselected || mode == Mode::Unselected {
            return false;
        }
        self.state = mode;
        true
    }

    /// The effective mode: `Run` when nothing was selected.
    pub fn resolved(&self) -> Mode {
        match self.state {
            Mode::Unselected => Mode::Run,
            mode => mode,
        }
    }
}
