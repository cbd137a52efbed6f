//! Core logger types and traits

pub mod environment;
pub mod error;
pub mod formatter;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod transport;

pub use environment::{AppMetadata, Environment};
pub use error::{LoggerError, Result};
pub use formatter::{format_json, format_pretty, FormatFn, Formatter};
pub use log_context::{FieldValue, LogContext};
pub use log_entry::{Attachment, ErrorInfo, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::TransportMetrics;
pub use registry::{LoggerRegistry, DEFAULT_LOGGER_NAME, LOGGER_NAME_KEY};
pub use transport::Transport;
