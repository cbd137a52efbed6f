//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;

/// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Render a UTC instant the way entries carry it
pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Serializable description of an application error attached to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture an error value.
    ///
    /// The name is the error's type name without its module path. The stack
    /// text is `Name: message` followed by the `source()` chain. Error values
    /// carry no origin location, so no call-site backtrace is added.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let name = short_type_name(std::any::type_name::<E>()).to_string();
        let message = err.to_string();

        let mut stack = format!("{}: {}", name, message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            name,
            message,
            stack: Some(stack),
        }
    }

    /// Stack text if present, otherwise the message
    pub fn detail(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

fn short_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full);
    let trimmed = without_generics.trim_start_matches("dyn ");
    let trimmed = trimmed.split(" + ").next().unwrap_or(trimmed);
    trimmed.rsplit("::").next().unwrap_or(trimmed)
}

/// A single log record, built fresh for every emitted call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl LogEntry {
    /// Entry stamped with the current time and an empty context
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: format_timestamp(&Utc::now()),
            level,
            message: message.into(),
            context: LogContext::new(),
            error: None,
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }
}

/// The optional second argument of a level method: a context or an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Context(LogContext),
    Error(ErrorInfo),
}

impl Attachment {
    /// Split an attachment and an explicit error into (context, error).
    ///
    /// The explicit error wins over one passed as the attachment.
    pub fn resolve(
        attachment: Option<Attachment>,
        error: Option<ErrorInfo>,
    ) -> (Option<LogContext>, Option<ErrorInfo>) {
        let (context, inferred) = match attachment {
            Some(Attachment::Context(context)) => (Some(context), None),
            Some(Attachment::Error(error)) => (None, Some(error)),
            None => (None, None),
        };
        (context, error.or(inferred))
    }
}

impl From<LogContext> for Attachment {
    fn from(context: LogContext) -> Self {
        Attachment::Context(context)
    }
}

impl From<ErrorInfo> for Attachment {
    fn from(error: ErrorInfo) -> Self {
        Attachment::Error(error)
    }
}
