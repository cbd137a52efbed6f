//! Main logger implementation

use super::{
    formatter::{format_json, Formatter},
    log_context::LogContext,
    log_entry::{Attachment, ErrorInfo, LogEntry},
    log_level::LogLevel,
    transport::Transport,
};
use crate::transports::console::{diagnostic, ConsoleChannel, ConsoleSink, Diagnostic, StdConsole};
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Leveled structured logger.
///
/// Every emitted call is formatted and written to the console sink, then the
/// unformatted entry is forwarded to each attached transport. Setters mutate
/// the instance in place; [`Logger::child`] derives an independent logger.
pub struct Logger {
    min_level: RwLock<LogLevel>,
    formatter: RwLock<Formatter>,
    context: LogContext,
    transports: RwLock<Vec<Arc<dyn Transport>>>,
    console: Arc<dyn ConsoleSink>,
}

impl Logger {
    /// Logger at `info` with the JSON formatter writing to the process console
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Derive a logger whose context is this one's with `overlay` on top.
    ///
    /// The parent is not modified. Level and formatter are copied; transports
    /// and the console sink are shared.
    #[must_use]
    pub fn child(&self, overlay: LogContext) -> Logger {
        Logger {
            min_level: RwLock::new(*self.min_level.read()),
            formatter: RwLock::new(self.formatter.read().clone()),
            context: self.context.merged(&overlay),
            transports: RwLock::new(self.transports.read().clone()),
            console: Arc::clone(&self.console),
        }
    }

    pub fn set_level(&self, level: LogLevel) -> &Self {
        *self.min_level.write() = level;
        self
    }

    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_formatter(&self, formatter: Formatter) -> &Self {
        *self.formatter.write() = formatter;
        self
    }

    pub fn formatter(&self) -> Formatter {
        self.formatter.read().clone()
    }

    pub fn use_json_format(&self) -> &Self {
        self.set_formatter(Formatter::Json)
    }

    pub fn use_pretty_format(&self, use_colors: bool) -> &Self {
        self.set_formatter(Formatter::Pretty { use_colors })
    }

    pub fn add_transport(&self, transport: Arc<dyn Transport>) {
        self.transports.write().push(transport);
    }

    pub fn transport_count(&self) -> usize {
        self.transports.read().len()
    }

    /// Base context merged into every entry of this logger
    pub fn context(&self) -> &LogContext {
        &self.context
    }

    /// Whether a call at `level` would be emitted
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Silent && level.should_emit(*self.min_level.read())
    }

    /// Emit an entry with optional call-site context and error.
    ///
    /// Below the threshold this is a no-op. Call-site context wins over the
    /// logger's base context on key collision.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Option<LogContext>,
        error: Option<ErrorInfo>,
    ) {
        if !self.is_enabled(level) {
            return;
        }

        let context = match context {
            Some(ref call_site) => self.context.merged(call_site),
            None => self.context.clone(),
        };

        let mut entry = LogEntry::new(level, message).with_context(context);
        entry.error = error;

        self.dispatch(&entry);
    }

    /// Emit with the context-or-error attachment and an explicit error.
    ///
    /// The explicit `error` wins over an error given as the attachment.
    pub fn log_with(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        attachment: Option<Attachment>,
        error: Option<ErrorInfo>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        let (context, error) = Attachment::resolve(attachment, error);
        self.log(level, message, context, error);
    }

    fn dispatch(&self, entry: &LogEntry) {
        let line = self.format(entry);
        self.console
            .write_line(ConsoleChannel::for_level(entry.level), &line);

        // Snapshot so a transport may attach further transports while logging
        let transports = self.transports.read().clone();
        for transport in transports.iter() {
            let result = catch_unwind(AssertUnwindSafe(|| transport.log(entry)));
            if let Err(panic_info) = result {
                diagnostic(
                    self.console.as_ref(),
                    Diagnostic::Critical,
                    &format!(
                        "Transport '{}' panicked: {}. Other transports continue to function.",
                        transport.name(),
                        panic_message(panic_info.as_ref())
                    ),
                );
            }
        }
    }

    fn format(&self, entry: &LogEntry) -> String {
        let formatter = self.formatter.read().clone();
        if !formatter.is_custom() {
            return formatter.format(entry);
        }

        match catch_unwind(AssertUnwindSafe(|| formatter.format(entry))) {
            Ok(line) => line,
            Err(panic_info) => {
                diagnostic(
                    self.console.as_ref(),
                    Diagnostic::Critical,
                    &format!(
                        "Custom formatter panicked: {}. Falling back to JSON.",
                        panic_message(panic_info.as_ref())
                    ),
                );
                format_json(entry)
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message, None, None);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message, None, None);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message, None, None);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message, None, None);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message, None, None);
    }

    /// Debug entry with a context or an error
    pub fn debug_with(&self, message: impl Into<String>, attachment: impl Into<Attachment>) {
        self.log_with(LogLevel::Debug, message, Some(attachment.into()), None);
    }

    /// Info entry with a context or an error
    pub fn info_with(&self, message: impl Into<String>, attachment: impl Into<Attachment>) {
        self.log_with(LogLevel::Info, message, Some(attachment.into()), None);
    }

    /// Warn entry with a context or an error
    pub fn warn_with(&self, message: impl Into<String>, attachment: impl Into<Attachment>) {
        self.log_with(LogLevel::Warn, message, Some(attachment.into()), None);
    }

    /// Error entry with a context or an error
    pub fn error_with(&self, message: impl Into<String>, attachment: impl Into<Attachment>) {
        self.log_with(LogLevel::Error, message, Some(attachment.into()), None);
    }

    /// Fatal entry with a context or an error
    pub fn fatal_with(&self, message: impl Into<String>, attachment: impl Into<Attachment>) {
        self.log_with(LogLevel::Fatal, message, Some(attachment.into()), None);
    }

    pub fn debug_with_error(
        &self,
        message: impl Into<String>,
        attachment: impl Into<Attachment>,
        error: ErrorInfo,
    ) {
        self.log_with(LogLevel::Debug, message, Some(attachment.into()), Some(error));
    }

    pub fn info_with_error(
        &self,
        message: impl Into<String>,
        attachment: impl Into<Attachment>,
        error: ErrorInfo,
    ) {
        self.log_with(LogLevel::Info, message, Some(attachment.into()), Some(error));
    }

    pub fn warn_with_error(
        &self,
        message: impl Into<String>,
        attachment: impl Into<Attachment>,
        error: ErrorInfo,
    ) {
        self.log_with(LogLevel::Warn, message, Some(attachment.into()), Some(error));
    }

    /// Error entry with context and error, e.g. a failed operation with its
    /// request details
    pub fn error_with_error(
        &self,
        message: impl Into<String>,
        attachment: impl Into<Attachment>,
        error: ErrorInfo,
    ) {
        self.log_with(LogLevel::Error, message, Some(attachment.into()), Some(error));
    }

    pub fn fatal_with_error(
        &self,
        message: impl Into<String>,
        attachment: impl Into<Attachment>,
        error: ErrorInfo,
    ) {
        self.log_with(LogLevel::Fatal, message, Some(attachment.into()), Some(error));
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &*self.min_level.read())
            .field("formatter", &*self.formatter.read())
            .field("context", &self.context)
            .field("transports", &self.transport_count())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_notify_logger::prelude::*;
/// use std::sync::Arc;
///
/// let console = Arc::new(MemoryConsole::new());
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .formatter(Formatter::pretty(false))
///     .field("service", "api")
///     .console(console.clone())
///     .build();
///
/// logger.debug("ready");
/// assert_eq!(console.len(), 1);
/// ```
#[derive(Clone)]
pub struct LoggerBuilder {
    min_level: LogLevel,
    formatter: Formatter,
    context: LogContext,
    transports: Vec<Arc<dyn Transport>>,
    console: Arc<dyn ConsoleSink>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            formatter: Formatter::Json,
            context: LogContext::new(),
            transports: Vec::new(),
            console: Arc::new(StdConsole),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the base context
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    /// Add one field to the base context
    #[must_use = "builder methods return a new value"]
    pub fn field(
        mut self,
        key: impl Into<String>,
        value: impl Into<super::log_context::FieldValue>,
    ) -> Self {
        self.context.add_field(key, value);
        self
    }

    /// Attach a transport
    #[must_use = "builder methods return a new value"]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Set the primary console sink
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = console;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            min_level: RwLock::new(self.min_level),
            formatter: RwLock::new(self.formatter),
            context: self.context,
            transports: RwLock::new(self.transports),
            console: self.console,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;
    use crate::transports::console::MemoryConsole;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl Transport for RecordingTransport {
        fn log(&self, entry: &LogEntry) {
            self.entries.lock().push(entry.clone());
        }

        fn filter(&self, _entry: &LogEntry) -> bool {
            true
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct PanickingTransport;

    impl Transport for PanickingTransport {
        fn log(&self, _entry: &LogEntry) {
            panic!("destination exploded");
        }

        fn filter(&self, _entry: &LogEntry) -> bool {
            true
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn memory_logger(level: LogLevel) -> (Logger, Arc<MemoryConsole>) {
        let console = Arc::new(MemoryConsole::new());
        let logger = Logger::builder()
            .min_level(level)
            .console(console.clone())
            .build();
        (logger, console)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build();
        assert_eq!(logger.level(), LogLevel::Info);
        assert!(matches!(logger.formatter(), Formatter::Json));
        assert!(logger.context().is_empty());
        assert_eq!(logger.transport_count(), 0);
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let (logger, console) = memory_logger(LogLevel::Warn);
        let transport = Arc::new(RecordingTransport::default());
        logger.add_transport(transport.clone());

        logger.debug("hidden");
        logger.info("hidden");

        assert!(console.is_empty());
        assert!(transport.entries.lock().is_empty());
    }

    #[test]
    fn test_silent_entries_are_never_emitted() {
        let (logger, console) = memory_logger(LogLevel::Debug);
        logger.log(LogLevel::Silent, "nothing", None, None);
        assert!(console.is_empty());

        logger.set_level(LogLevel::Silent);
        logger.fatal("suppressed");
        assert!(console.is_empty());
    }

    #[test]
    fn test_setters_chain() {
        let (logger, _console) = memory_logger(LogLevel::Info);
        logger.use_pretty_format(false).set_level(LogLevel::Error);

        assert_eq!(logger.level(), LogLevel::Error);
        assert!(matches!(logger.formatter(), Formatter::Pretty { use_colors: false }));
    }

    #[test]
    fn test_call_context_wins_over_base_context() {
        let console = Arc::new(MemoryConsole::new());
        let logger = Logger::builder()
            .field("source", "base")
            .field("app", "billing")
            .console(console.clone())
            .build();

        logger.info_with("merge", LogContext::new().with_field("source", "call"));

        let line = &console.lines_on(ConsoleChannel::Info)[0];
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["source"], "call");
        assert_eq!(parsed["app"], "billing");
    }

    #[test]
    fn test_transport_receives_unformatted_entry() {
        let (logger, _console) = memory_logger(LogLevel::Info);
        let transport = Arc::new(RecordingTransport::default());
        logger.add_transport(transport.clone());

        let error = ErrorInfo::new("Error", "boom");
        logger.error_with("failed", error.clone());

        let entries = transport.entries.lock();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "failed");
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[0].error, Some(error));
    }

    #[test]
    fn test_panicking_transport_is_isolated() {
        let (logger, console) = memory_logger(LogLevel::Info);
        let transport = Arc::new(RecordingTransport::default());
        logger.add_transport(Arc::new(PanickingTransport));
        logger.add_transport(transport.clone());

        logger.info("still delivered");

        assert_eq!(transport.entries.lock().len(), 1);
        let errors = console.lines_on(ConsoleChannel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("[LOGGER CRITICAL] Transport 'panicking' panicked"));
        assert!(errors[0].contains("destination exploded"));
    }

    #[test]
    fn test_panicking_formatter_falls_back_to_json() {
        let (logger, console) = memory_logger(LogLevel::Info);
        logger.set_formatter(Formatter::custom(|_| panic!("bad template")));

        logger.info("survives");

        let info = console.lines_on(ConsoleChannel::Info);
        assert_eq!(info.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&info[0]).unwrap();
        assert_eq!(parsed["message"], "survives");
        assert_eq!(console.lines_on(ConsoleChannel::Error).len(), 1);
    }

    #[test]
    fn test_child_shares_transports() {
        let (parent, _console) = memory_logger(LogLevel::Info);
        let transport = Arc::new(RecordingTransport::default());
        parent.add_transport(transport.clone());

        let child = parent.child(LogContext::new().with_field("module", "auth"));
        child.info("from child");

        assert_eq!(transport.entries.lock().len(), 1);
        assert_eq!(
            transport.entries.lock()[0].context.get("module"),
            Some(&FieldValue::from("auth"))
        );
    }

    #[test]
    fn test_child_configuration_is_independent() {
        let (parent, _console) = memory_logger(LogLevel::Info);
        let child = parent.child(LogContext::new());

        child.set_level(LogLevel::Debug);
        child.add_transport(Arc::new(RecordingTransport::default()));

        assert_eq!(parent.level(), LogLevel::Info);
        assert_eq!(parent.transport_count(), 0);
    }
}
