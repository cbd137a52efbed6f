//! Console sink: the primary destination of every emitted entry

use crate::core::LogLevel;
use parking_lot::Mutex;
use std::io::Write;

/// Console channel an entry is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleChannel {
    Debug,
    Info,
    Warn,
    /// Shared by `error` and `fatal` entries and by internal diagnostics
    Error,
}

impl ConsoleChannel {
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => ConsoleChannel::Debug,
            LogLevel::Info | LogLevel::Silent => ConsoleChannel::Info,
            LogLevel::Warn => ConsoleChannel::Warn,
            LogLevel::Error | LogLevel::Fatal => ConsoleChannel::Error,
        }
    }
}

/// Line-oriented console with four channels
pub trait ConsoleSink: Send + Sync {
    fn write_line(&self, channel: ConsoleChannel, line: &str);
}

/// Process console: debug and info go to stdout, warn and error to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl ConsoleSink for StdConsole {
    fn write_line(&self, channel: ConsoleChannel, line: &str) {
        // A closed pipe must not take the caller down with it
        let _ = match channel {
            ConsoleChannel::Debug | ConsoleChannel::Info => {
                writeln!(std::io::stdout().lock(), "{}", line)
            }
            ConsoleChannel::Warn | ConsoleChannel::Error => {
                writeln!(std::io::stderr().lock(), "{}", line)
            }
        };
    }
}

/// In-memory console that records every line with its channel
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<(ConsoleChannel, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines in write order
    pub fn lines(&self) -> Vec<(ConsoleChannel, String)> {
        self.lines.lock().clone()
    }

    /// Lines written to one channel
    pub fn lines_on(&self, channel: ConsoleChannel) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl ConsoleSink for MemoryConsole {
    fn write_line(&self, channel: ConsoleChannel, line: &str) {
        self.lines.lock().push((channel, line.to_string()));
    }
}

/// Severity of an internal diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Diagnostic {
    Warning,
    Error,
    Critical,
}

/// Report a failure of the logging pipeline itself on the fallback channel
pub(crate) fn diagnostic(console: &dyn ConsoleSink, kind: Diagnostic, message: &str) {
    let (channel, tag) = match kind {
        Diagnostic::Warning => (ConsoleChannel::Warn, "LOGGER WARNING"),
        Diagnostic::Error => (ConsoleChannel::Error, "LOGGER ERROR"),
        Diagnostic::Critical => (ConsoleChannel::Error, "LOGGER CRITICAL"),
    };
    console.write_line(channel, &format!("[{}] {}", tag, message));
}
