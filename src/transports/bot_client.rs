//! Bot-API client capability used by the notification transport

use crate::core::Result;

/// Sends one text message to a chat.
///
/// Injected into [`TelegramTransport`](super::TelegramTransport) so the
/// transport never looks up its HTTP stack at runtime.
pub trait NotificationClient: Send + Sync {
    fn send_message(&self, chat_id: &str, text: &str) -> Result<()>;
}

#[cfg(feature = "telegram")]
pub use http::TelegramBotClient;

#[cfg(feature = "telegram")]
mod http {
    use super::NotificationClient;
    use crate::core::{LoggerError, Result};
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::time::Duration;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    #[derive(Serialize)]
    struct SendMessageRequest<'a> {
        chat_id: &'a str,
        text: &'a str,
    }

    #[derive(Deserialize)]
    struct ApiResponse {
        ok: bool,
        description: Option<String>,
    }

    /// Telegram Bot API client calling `sendMessage`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_notify_logger::transports::{NotificationClient, TelegramBotClient};
    ///
    /// let client = TelegramBotClient::new("123456:ABC-DEF").expect("valid token");
    /// client.send_message("-100200300", "deploy finished").ok();
    /// ```
    pub struct TelegramBotClient {
        http: reqwest::blocking::Client,
        endpoint: String,
    }

    impl TelegramBotClient {
        pub const DEFAULT_API_BASE: &'static str = "https://api.telegram.org";

        pub fn new(token: &str) -> Result<Self> {
            Self::with_api_base(token, Self::DEFAULT_API_BASE)
        }

        /// Client against a custom API host (self-hosted Bot API server, tests)
        pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
            let token = token.trim();
            if token.is_empty() {
                return Err(LoggerError::config("TelegramBotClient", "bot token is empty"));
            }
            if api_base.trim().is_empty() {
                return Err(LoggerError::config("TelegramBotClient", "API base URL is empty"));
            }

            let http = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?;

            Ok(Self {
                http,
                endpoint: format!(
                    "{}/bot{}/sendMessage",
                    api_base.trim_end_matches('/'),
                    token
                ),
            })
        }
    }

    impl NotificationClient for TelegramBotClient {
        fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
            let response = self
                .http
                .post(&self.endpoint)
                .json(&SendMessageRequest { chat_id, text })
                .send()?;

            let status = response.status();
            // The Bot API reports failures in the body even on 4xx
            let body: ApiResponse = response.json().map_err(|e| {
                LoggerError::delivery("telegram", format!("HTTP {}: {}", status, e))
            })?;

            if status.is_success() && body.ok {
                Ok(())
            } else {
                Err(LoggerError::delivery(
                    "telegram",
                    body.description
                        .unwrap_or_else(|| format!("HTTP {}", status)),
                ))
            }
        }
    }

    impl fmt::Debug for TelegramBotClient {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            // The endpoint embeds the bot token
            f.debug_struct("TelegramBotClient")
                .field("endpoint", &"<redacted>")
                .finish()
        }
    }

}
