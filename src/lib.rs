//! # Rust Notify Logger
//!
//! A leveled, structured logging library. Each call passes a small pipeline:
//! level filtering, context merging, formatting, then fan-out to the console
//! and to any attached transports.
//!
//! ## Features
//!
//! - **Structured**: JSON lines for log-management ingestion, or pretty text
//! - **Child loggers**: derive loggers with extra context, parent untouched
//! - **Transports**: forward entries to a Telegram chat with per-transport filters
//! - **Never throws**: delivery failures become diagnostics, not errors
//!
//! ```
//! use rust_notify_logger::prelude::*;
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.get_logger(Some("payments"));
//! logger.use_pretty_format(false).set_level(LogLevel::Debug);
//!
//! let request = logger.child(context! { "requestId" => "req-42" });
//! request.info_with("charge accepted", context! { "amount" => 100.5 });
//! ```

pub mod core;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::context;
    pub use crate::core::{
        AppMetadata, Attachment, Environment, ErrorInfo, FieldValue, Formatter, LogContext,
        LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerRegistry, Result,
        Transport, TransportMetrics,
    };
    pub use crate::transports::{
        ConsoleChannel, ConsoleSink, DeliveryMode, MemoryConsole, NotificationClient,
        StdConsole, TelegramTransport, TelegramTransportOptions,
    };
}

pub use self::core::{
    format_json, format_pretty, AppMetadata, Attachment, Environment, ErrorInfo, FieldValue,
    FormatFn, Formatter, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError,
    LoggerRegistry, Result, Transport, TransportMetrics,
};
pub use transports::{
    ConsoleChannel, ConsoleSink, MemoryConsole, StdConsole, TelegramTransport,
    TelegramTransportOptions,
};
