//! Console and terminal output shown in the bottom panel.

use std::fmt;
use std::sync::OnceLock;

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub const WELCOME_LINE: &str = "Welcome to codepad";

/// Target of the events that mirror console lines.
pub const CONSOLE_TARGET: &str = "codepad::console";

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Reads the local UTC offset once. `time` only reports it while the process has a single
/// thread, so this must run before the runtime or the log writer start. Stamps are UTC until
/// it has run.
pub fn capture_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub stamp: String,
    pub text: String,
}

impl fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stamp, self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomPanelTab {
    #[default]
    Console,
    Terminal,
    Problems,
}

impl BottomPanelTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Console => "Console",
            Self::Terminal => "Terminal",
            Self::Problems => "Problems",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    console: Vec<ConsoleLine>,
    terminal: Vec<ConsoleLine>,
    pub active_tab: BottomPanelTab,
}

impl ConsoleState {
    pub fn new() -> Self {
        let mut state = Self::default();
        state.push_terminal(WELCOME_LINE);
        state
    }

    pub fn console(&self) -> &[ConsoleLine] {
        &self.console
    }

    pub fn terminal(&self) -> &[ConsoleLine] {
        &self.terminal
    }

    pub fn push_console(&mut self, text: impl Into<String>) {
        let line = stamped(text.into());
        tracing::info!(target: CONSOLE_TARGET, "{}", line.text);
        self.console.push(line);
    }

    pub fn push_terminal(&mut self, text: impl Into<String>) {
        self.terminal.push(stamped(text.into()));
    }

    /// Lines for the active tab; the problems tab has none.
    pub fn visible_lines(&self) -> &[ConsoleLine] {
        match self.active_tab {
            BottomPanelTab::Console => &self.console,
            BottomPanelTab::Terminal => &self.terminal,
            BottomPanelTab::Problems => &[],
        }
    }
}

fn stamped(text: String) -> ConsoleLine {
    let offset = LOCAL_OFFSET.get().copied().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    let clock = now
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default();
    ConsoleLine {
        stamp: format!("[{clock}]"),
        text,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/console.rs"]
mod tests;
