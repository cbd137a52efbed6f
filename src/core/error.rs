//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Outbound delivery to an external destination failed
    #[error("Delivery to {destination} failed: {message}")]
    Delivery { destination: String, message: String },

    /// HTTP client error
    #[cfg(feature = "telegram")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport was disabled at construction and accepts nothing
    #[error("Transport '{name}' is disabled")]
    TransportDisabled { name: String },
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a delivery error
    pub fn delivery(destination: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Delivery {
            destination: destination.into(),
            message: message.into(),
        }
    }

    pub fn transport_disabled(name: impl Into<String>) -> Self {
        LoggerError::TransportDisabled { name: name.into() }
    }
}
