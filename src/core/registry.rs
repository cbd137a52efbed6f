//! Named logger registry
//!
//! An explicit, owned replacement for a process-wide logger cache: create one
//! at startup and pass it to the code that needs shared loggers.

use super::environment::Environment;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerBuilder};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Key used when no name is requested
pub const DEFAULT_LOGGER_NAME: &str = "default";

/// Context key tagging a named logger
pub const LOGGER_NAME_KEY: &str = "loggerName";

/// Hands out loggers by name.
///
/// Only the unnamed logger is cached. A call with an explicit name that is not
/// already cached returns a fresh logger tagged with `loggerName` each time;
/// such loggers are not affected by [`LoggerRegistry::set_global_level`].
///
/// # Example
///
/// ```
/// use rust_notify_logger::prelude::*;
///
/// let registry = LoggerRegistry::new();
/// let a = registry.get_logger(None);
/// let b = registry.get_logger(None);
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
///
/// let svc = registry.get_logger(Some("svc"));
/// assert_eq!(svc.context().get("loggerName"), Some(&FieldValue::from("svc")));
/// ```
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    defaults: LoggerBuilder,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::with_defaults(LoggerBuilder::new())
    }

    /// Registry whose new loggers start from `defaults`
    pub fn with_defaults(defaults: LoggerBuilder) -> Self {
        Self {
            loggers: Mutex::new(HashMap::new()),
            defaults,
        }
    }

    /// Cached logger for `name` (default `"default"`), or a new one.
    pub fn get_logger(&self, name: Option<&str>) -> Arc<Logger> {
        self.get_logger_with(name, self.defaults.clone())
    }

    /// Like [`get_logger`](Self::get_logger), building a missing logger from
    /// `options`. Options are ignored when the logger is already cached.
    pub fn get_logger_with(&self, name: Option<&str>, options: LoggerBuilder) -> Arc<Logger> {
        let key = name.unwrap_or(DEFAULT_LOGGER_NAME);

        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(key) {
            return Arc::clone(logger);
        }

        let logger = options.build();

        if let Some(name) = name {
            return Arc::new(logger.child(LogContext::new().with_field(LOGGER_NAME_KEY, name)));
        }

        let logger = Arc::new(logger);
        loggers.insert(key.to_string(), Arc::clone(&logger));
        logger
    }

    /// Set the level of every cached logger
    pub fn set_global_level(&self, level: LogLevel) {
        for logger in self.loggers.lock().values() {
            logger.set_level(level);
        }
    }

    /// Logger configured for the deployment mode in `APP_ENV`
    pub fn create_env_logger(
        &self,
        name: Option<&str>,
        options: Option<LoggerBuilder>,
    ) -> Arc<Logger> {
        self.create_env_logger_for(Environment::from_env(), name, options)
    }

    /// Logger configured for an explicit deployment mode
    pub fn create_env_logger_for(
        &self,
        environment: Environment,
        name: Option<&str>,
        options: Option<LoggerBuilder>,
    ) -> Arc<Logger> {
        let logger = match options {
            Some(options) => self.get_logger_with(name, options),
            None => self.get_logger(name),
        };
        environment.apply(&logger);
        logger
    }

    /// Names currently cached
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
