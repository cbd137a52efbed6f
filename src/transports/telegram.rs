//! Telegram transport for sending log entries to a chat
//!
//! Entries that pass the transport's level and predicate are formatted,
//! capped to the Bot API's message size and handed to a
//! [`NotificationClient`]. Delivery failures never reach the caller: they are
//! counted and reported on the diagnostic console.

use super::bot_client::NotificationClient;
use super::console::{diagnostic, ConsoleSink, Diagnostic, StdConsole};
use crate::core::{
    Formatter, LogEntry, LogLevel, LoggerError, Result, Transport, TransportMetrics,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Longest text sent as-is; the Bot API rejects messages over 4096 characters
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Appended to messages cut at [`MAX_MESSAGE_CHARS`]
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Background deliveries allowed to run at once by default
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Predicate deciding whether an entry is sent
pub type EntryFilter = Arc<dyn Fn(&LogEntry) -> bool + Send + Sync>;

/// Where the outbound call runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Fire-and-forget on a spawned thread, at most
    /// [`TelegramTransportOptions::max_in_flight`] at once
    #[default]
    Background,
    /// On the logging thread, before `log` returns
    Inline,
}

/// Configuration of a [`TelegramTransport`]
#[derive(Clone)]
pub struct TelegramTransportOptions {
    pub token: String,
    pub chat_id: String,
    pub min_level: LogLevel,
    pub formatter: Formatter,
    pub filter: Option<EntryFilter>,
    pub delivery: DeliveryMode,
    /// Cap on concurrent background deliveries; entries over it are dropped
    pub max_in_flight: usize,
    /// Receives `[LOGGER ...]` diagnostics
    pub diagnostics: Arc<dyn ConsoleSink>,
}

impl TelegramTransportOptions {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            min_level: LogLevel::Info,
            formatter: Formatter::Json,
            filter: None,
            delivery: DeliveryMode::Background,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            diagnostics: Arc::new(StdConsole),
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&LogEntry) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    #[must_use]
    pub fn delivery(mut self, delivery: DeliveryMode) -> Self {
        self.delivery = delivery;
        self
    }

    /// At least one delivery is always allowed
    #[must_use]
    pub fn max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Arc<dyn ConsoleSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

impl fmt::Debug for TelegramTransportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramTransportOptions")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("min_level", &self.min_level)
            .field("formatter", &self.formatter)
            .field("filter", &self.filter.is_some())
            .field("delivery", &self.delivery)
            .field("max_in_flight", &self.max_in_flight)
            .finish()
    }
}

/// Transport delivering entries to a Telegram chat
///
/// # Example
///
/// ```no_run
/// use rust_notify_logger::prelude::*;
/// use rust_notify_logger::transports::{TelegramTransport, TelegramTransportOptions};
/// use std::sync::Arc;
///
/// let logger = Logger::new();
/// let transport = TelegramTransport::new(
///     TelegramTransportOptions::new("123456:ABC-DEF", "-100200300")
///         .min_level(LogLevel::Error),
/// );
/// logger.add_transport(Arc::new(transport));
/// logger.error("Critical system failure detected!");
/// ```
pub struct TelegramTransport {
    options: TelegramTransportOptions,
    client: Option<Arc<dyn NotificationClient>>,
    metrics: Arc<TransportMetrics>,
    in_flight: Arc<InFlight>,
}

/// Background deliveries currently running
#[derive(Debug, Default)]
struct InFlight {
    count: AtomicUsize,
    saturation_reported: AtomicBool,
}

impl InFlight {
    fn try_acquire(self: &Arc<Self>, max: usize) -> Option<InFlightSlot> {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < max).then_some(n + 1))
            .ok()
            .map(|_| InFlightSlot(Arc::clone(self)))
    }
}

/// Held by one background delivery; frees its slot when dropped
struct InFlightSlot(Arc<InFlight>);

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.count.fetch_sub(1, Ordering::AcqRel);
        // The next saturation gets its own diagnostic
        self.0.saturation_reported.store(false, Ordering::Release);
    }
}

impl TelegramTransport {
    /// Build the HTTP client from the options' token.
    ///
    /// If the client cannot be built the transport is disabled.
    #[cfg(feature = "telegram")]
    pub fn new(options: TelegramTransportOptions) -> Self {
        match super::bot_client::TelegramBotClient::new(&options.token) {
            Ok(client) => Self::with_client(options, Arc::new(client)),
            Err(e) => Self::disabled(options, e),
        }
    }

    /// Without the `telegram` feature there is no HTTP client; the transport
    /// is disabled.
    #[cfg(not(feature = "telegram"))]
    pub fn new(options: TelegramTransportOptions) -> Self {
        Self::disabled(
            options,
            LoggerError::config(
                "TelegramTransport",
                "built without the `telegram` feature, no HTTP client available",
            ),
        )
    }

    /// Transport delivering through an injected client
    pub fn with_client(options: TelegramTransportOptions, client: Arc<dyn NotificationClient>) -> Self {
        Self {
            options,
            client: Some(client),
            metrics: Arc::new(TransportMetrics::new()),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Permanently disabled transport; emits one warning naming `reason`
    pub fn disabled(options: TelegramTransportOptions, reason: LoggerError) -> Self {
        diagnostic(
            options.diagnostics.as_ref(),
            Diagnostic::Warning,
            &format!("Telegram transport disabled: {}", reason),
        );
        Self {
            options,
            client: None,
            metrics: Arc::new(TransportMetrics::new()),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn options(&self) -> &TelegramTransportOptions {
        &self.options
    }

    pub fn metrics(&self) -> &TransportMetrics {
        &self.metrics
    }

    /// Background deliveries not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::Acquire)
    }

    /// Text that would be sent for `entry`
    pub fn prepare_message(&self, entry: &LogEntry) -> String {
        let (text, truncated) = truncate_message(self.options.formatter.format(entry));
        if truncated {
            self.metrics.record_truncated();
        }
        text
    }

    /// Send raw text on the calling thread, bypassing level and predicate.
    pub fn send(&self, text: &str) -> Result<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| LoggerError::transport_disabled(self.name()))?;
        let (text, _) = truncate_message(text.to_string());
        client.send_message(&self.options.chat_id, &text)
    }

    fn deliver(
        client: &dyn NotificationClient,
        chat_id: &str,
        text: &str,
        metrics: &TransportMetrics,
        diagnostics: &dyn ConsoleSink,
    ) {
        match client.send_message(chat_id, text) {
            Ok(()) => metrics.record_delivered(),
            Err(e) => {
                metrics.record_failed();
                diagnostic(
                    diagnostics,
                    Diagnostic::Error,
                    &format!("Error sending log to Telegram: {}", e),
                );
            }
        }
    }
}

impl Transport for TelegramTransport {
    fn log(&self, entry: &LogEntry) {
        if !self.filter(entry) {
            self.metrics.record_filtered();
            return;
        }
        let Some(client) = self.client.as_ref() else {
            return;
        };

        match self.options.delivery {
            DeliveryMode::Inline => Self::deliver(
                client.as_ref(),
                &self.options.chat_id,
                &self.prepare_message(entry),
                &self.metrics,
                self.options.diagnostics.as_ref(),
            ),
            DeliveryMode::Background => {
                let Some(slot) = self.in_flight.try_acquire(self.options.max_in_flight) else {
                    self.metrics.record_dropped();
                    if !self.in_flight.saturation_reported.swap(true, Ordering::AcqRel) {
                        diagnostic(
                            self.options.diagnostics.as_ref(),
                            Diagnostic::Warning,
                            &format!(
                                "Telegram transport saturated: {} deliveries in flight, dropping entries until one completes",
                                self.options.max_in_flight
                            ),
                        );
                    }
                    return;
                };

                let text = self.prepare_message(entry);
                let client = Arc::clone(client);
                let chat_id = self.options.chat_id.clone();
                let metrics = Arc::clone(&self.metrics);
                let diagnostics = Arc::clone(&self.options.diagnostics);

                // A failed spawn drops the closure and with it the slot
                let spawned = thread::Builder::new()
                    .name("telegram-transport".to_string())
                    .spawn(move || {
                        let _slot = slot;
                        Self::deliver(
                            client.as_ref(),
                            &chat_id,
                            &text,
                            &metrics,
                            diagnostics.as_ref(),
                        )
                    });

                if let Err(e) = spawned {
                    self.metrics.record_failed();
                    diagnostic(
                        self.options.diagnostics.as_ref(),
                        Diagnostic::Error,
                        &format!("Failed to spawn Telegram delivery thread: {}", e),
                    );
                }
            }
        }
    }

    fn filter(&self, entry: &LogEntry) -> bool {
        if self.client.is_none() {
            return false;
        }

        if !entry.level.should_emit(self.options.min_level) {
            return false;
        }

        match self.options.filter {
            Some(ref predicate) => predicate(entry),
            None => true,
        }
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

impl fmt::Debug for TelegramTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramTransport")
            .field("options", &self.options)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Cap `text` at [`MAX_MESSAGE_CHARS`] characters plus [`TRUNCATION_MARKER`].
///
/// Returns the text and whether it was cut.
pub fn truncate_message(text: String) -> (String, bool) {
    match text.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => {
            let mut truncated = text[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            (truncated, true)
        }
        None => (text, false),
    }
}
