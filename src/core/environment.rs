//! Environment-driven configuration profiles
//!
//! The deployment mode comes from `APP_ENV`; application metadata from
//! `APP_VERSION` and `APP_REGION`. Values are taken as-is, only checked for
//! presence.

use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::logger::Logger;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variable selecting the deployment mode
pub const ENV_MODE_VAR: &str = "APP_ENV";
pub const APP_VERSION_VAR: &str = "APP_VERSION";
pub const APP_REGION_VAR: &str = "APP_REGION";

/// Deployment mode and its logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// JSON output, `info` and above
    Production,
    /// `warn` and above, formatter untouched
    Test,
    /// Colored pretty output, everything from `debug`
    #[default]
    Development,
}

impl Environment {
    /// Mode from `APP_ENV`; missing or unknown values mean development
    pub fn from_env() -> Self {
        std::env::var(ENV_MODE_VAR)
            .map(|value| Self::from_indicator(&value))
            .unwrap_or_default()
    }

    pub fn from_indicator(value: &str) -> Self {
        match value {
            "production" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Test => "test",
            Environment::Development => "development",
        }
    }

    /// Apply this profile to `logger` in place
    pub fn apply<'a>(&self, logger: &'a Logger) -> &'a Logger {
        match self {
            Environment::Production => logger.use_json_format().set_level(LogLevel::Info),
            Environment::Test => logger.set_level(LogLevel::Warn),
            Environment::Development => logger.use_pretty_format(true).set_level(LogLevel::Debug),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application metadata attached to service loggers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub version: Option<String>,
    pub region: Option<String>,
}

impl AppMetadata {
    pub fn from_env() -> Self {
        Self {
            version: non_empty_var(APP_VERSION_VAR),
            region: non_empty_var(APP_REGION_VAR),
        }
    }

    /// Context holding the fields that are present
    pub fn to_context(&self) -> LogContext {
        let mut context = LogContext::new();
        if let Some(ref version) = self.version {
            context.add_field("version", version);
        }
        if let Some(ref region) = self.region {
            context.add_field("region", region);
        }
        context
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, Formatter};

    #[test]
    fn test_from_indicator() {
        assert_eq!(Environment::from_indicator("production"), Environment::Production);
        assert_eq!(Environment::from_indicator("test"), Environment::Test);
        assert_eq!(Environment::from_indicator("staging"), Environment::Development);
        assert_eq!(Environment::from_indicator(""), Environment::Development);
        // Matching is exact, as with the raw variable
        assert_eq!(Environment::from_indicator("PRODUCTION"), Environment::Development);
    }

    #[test]
    fn test_profiles() {
        let logger = Logger::builder().formatter(Formatter::pretty(false)).build();

        Environment::Test.apply(&logger);
        assert_eq!(logger.level(), LogLevel::Warn);
        assert!(matches!(logger.formatter(), Formatter::Pretty { use_colors: false }));

        Environment::Production.apply(&logger);
        assert_eq!(logger.level(), LogLevel::Info);
        assert!(matches!(logger.formatter(), Formatter::Json));

        Environment::Development.apply(&logger);
        assert_eq!(logger.level(), LogLevel::Debug);
        assert!(matches!(logger.formatter(), Formatter::Pretty { use_colors: true }));
    }

    #[test]
    fn test_metadata_context_has_only_present_fields() {
        let metadata = AppMetadata {
            version: Some("1.4.2".to_string()),
            region: None,
        };
        let context = metadata.to_context();
        assert_eq!(context.len(), 1);
        assert_eq!(context.get("version"), Some(&FieldValue::from("1.4.2")));
        assert!(AppMetadata::default().to_context().is_empty());
    }
}
