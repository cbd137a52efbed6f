//! Formatters turning a log entry into one line of text
//!
//! Provides the built-in formats:
//! - Json: single-line object for log-management ingestion (default)
//! - Pretty: human-readable text with optional level colors
//! - Custom: any user-supplied function

use super::log_entry::LogEntry;
use std::fmt;
use std::sync::Arc;

/// User-supplied formatting function
pub type FormatFn = Arc<dyn Fn(&LogEntry) -> String + Send + Sync>;

/// Formatter applied to each entry before it is written
#[derive(Clone, Default)]
pub enum Formatter {
    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"info","message":"Request processed","userId":"42"}`
    #[default]
    Json,

    /// Human-readable text format
    ///
    /// Example: `2025-01-08T10:30:45.123Z [INFO] Request processed {"userId":"42"}`
    Pretty { use_colors: bool },

    /// Custom formatting function
    Custom(FormatFn),
}

impl Formatter {
    pub fn pretty(use_colors: bool) -> Self {
        Formatter::Pretty { use_colors }
    }

    pub fn custom<F>(format: F) -> Self
    where
        F: Fn(&LogEntry) -> String + Send + Sync + 'static,
    {
        Formatter::Custom(Arc::new(format))
    }

    /// Format a log entry according to this formatter
    pub fn format(&self, entry: &LogEntry) -> String {
        match self {
            Formatter::Json => format_json(entry),
            Formatter::Pretty { use_colors } => format_pretty(entry, *use_colors),
            Formatter::Custom(format) => format(entry),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Formatter::Custom(_))
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Json => write!(f, "Json"),
            Formatter::Pretty { use_colors } => f
                .debug_struct("Pretty")
                .field("use_colors", use_colors)
                .finish(),
            Formatter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Format as a single-line JSON object
///
/// Context keys are flattened next to `timestamp`, `level` and `message` and
/// overwrite them on collision. An attached error is nested under `error`.
pub fn format_json(entry: &LogEntry) -> String {
    let mut json_obj = serde_json::Map::new();

    json_obj.insert(
        "timestamp".to_string(),
        serde_json::Value::String(entry.timestamp.clone()),
    );
    json_obj.insert(
        "level".to_string(),
        serde_json::Value::String(entry.level.to_str().to_string()),
    );
    json_obj.insert(
        "message".to_string(),
        serde_json::Value::String(entry.message.clone()),
    );

    for (key, value) in entry.context.fields() {
        json_obj.insert(key.clone(), value.to_json_value());
    }

    if let Some(ref error) = entry.error {
        json_obj.insert(
            "error".to_string(),
            serde_json::json!({
                "name": error.name,
                "message": error.message,
                "stack": error.stack,
            }),
        );
    }

    // A map of plain JSON values always serializes
    serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
}

/// Format as human-readable text
///
/// With `use_colors` the level tag is always wrapped in its ANSI color,
/// whatever the terminal or `NO_COLOR` settings of the process.
pub fn format_pretty(entry: &LogEntry, use_colors: bool) -> String {
    let tag = format!("[{}]", entry.level.label());
    let level_display = match entry.level.color_code() {
        Some(color) if use_colors => format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), tag),
        _ => tag,
    };

    let mut output = format!("{} {} {}", entry.timestamp, level_display, entry.message);

    if !entry.context.is_empty() {
        output.push(' ');
        output.push_str(&entry.context.to_string());
    }

    if let Some(ref error) = entry.error {
        output.push('\n');
        output.push_str(error.detail());
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorInfo, LogContext, LogLevel};

    const TS: &str = "2025-01-08T10:30:45.123Z";

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry::new(level, message).with_timestamp(TS)
    }

    #[test]
    fn test_json_format() {
        let result = format_json(&entry(LogLevel::Error, "Error occurred"));

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["level"], "error");
        assert_eq!(parsed["message"], "Error occurred");
        assert_eq!(parsed["timestamp"], TS);
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn test_json_format_key_order() {
        let result = format_json(&entry(LogLevel::Info, "ordered"));
        assert_eq!(
            result,
            format!(r#"{{"timestamp":"{}","level":"info","message":"ordered"}}"#, TS)
        );
    }

    #[test]
    fn test_json_format_with_context() {
        let context = LogContext::new()
            .with_field("request_id", "abc-123")
            .with_field("latency_ms", 42);

        let result = format_json(&entry(LogLevel::Info, "Request completed").with_context(context));

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["latency_ms"], 42);
    }

    #[test]
    fn test_json_context_overwrites_reserved_keys() {
        let context = LogContext::new().with_field("message", "from context");
        let result = format_json(&entry(LogLevel::Info, "original").with_context(context));

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["message"], "from context");
    }

    #[test]
    fn test_json_format_with_error() {
        let error = ErrorInfo::new("Error", "Payment gateway timeout")
            .with_stack("Error: Payment gateway timeout\n    at charge()");
        let result = format_json(&entry(LogLevel::Error, "Payment failed").with_error(error));

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["error"]["name"], "Error");
        assert_eq!(parsed["error"]["message"], "Payment gateway timeout");
        assert!(parsed["error"]["stack"].as_str().unwrap().contains("at charge()"));
        assert!(!result.contains('\n'));
    }

    #[test]
    fn test_json_format_error_without_stack() {
        let result = format_json(
            &entry(LogLevel::Error, "failed").with_error(ErrorInfo::new("IoError", "denied")),
        );
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(parsed["error"]["stack"].is_null());
    }

    #[test]
    fn test_pretty_format_plain() {
        let result = format_pretty(&entry(LogLevel::Info, "Server started"), false);
        assert_eq!(result, format!("{} [INFO] Server started", TS));
    }

    #[test]
    fn test_pretty_format_with_context_and_error() {
        let context = LogContext::new().with_field("port", 8080);
        let error = ErrorInfo::new("BindError", "address in use");
        let result = format_pretty(
            &entry(LogLevel::Fatal, "Bind failed")
                .with_context(context)
                .with_error(error),
            false,
        );

        assert_eq!(
            result,
            format!("{} [FATAL] Bind failed {{\"port\":8080}}\naddress in use", TS)
        );
    }

    #[test]
    fn test_pretty_format_colors() {
        let result = format_pretty(&entry(LogLevel::Warn, "Low disk space"), true);
        assert!(result.contains("\x1b[33m[WARN]\x1b[0m"));
        assert!(result.ends_with("Low disk space"));

        let result = format_pretty(&entry(LogLevel::Debug, "verbose"), true);
        assert!(result.contains("\x1b[90m[DEBUG]\x1b[0m"));
    }

    #[test]
    fn test_pretty_colors_ignore_terminal_detection() {
        // Colors disabled process-wide, as with NO_COLOR or a piped stdout
        colored::control::set_override(false);
        let result = format_pretty(&entry(LogLevel::Error, "disk"), true);
        colored::control::unset_override();

        assert_eq!(result, format!("{} \x1b[31m[ERROR]\x1b[0m disk", TS));
        assert!(!format_pretty(&entry(LogLevel::Error, "disk"), false).contains('\x1b'));
    }

    #[test]
    fn test_custom_formatter() {
        let formatter = Formatter::custom(|e| format!("{}|{}", e.level, e.message));
        assert!(formatter.is_custom());
        assert_eq!(formatter.format(&entry(LogLevel::Debug, "x")), "debug|x");
    }

    #[test]
    fn test_formatter_default() {
        assert!(matches!(Formatter::default(), Formatter::Json));
        assert_eq!(format!("{:?}", Formatter::pretty(true)), "Pretty { use_colors: true }");
    }
}
