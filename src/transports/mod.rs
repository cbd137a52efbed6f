//! Output sinks: the primary console and secondary transports

pub mod bot_client;
pub mod console;
pub mod telegram;

#[cfg(feature = "telegram")]
pub use bot_client::TelegramBotClient;
pub use bot_client::NotificationClient;
pub use console::{ConsoleChannel, ConsoleSink, MemoryConsole, StdConsole};
pub use telegram::{
    truncate_message, DeliveryMode, EntryFilter, TelegramTransport, TelegramTransportOptions,
    DEFAULT_MAX_IN_FLIGHT, MAX_MESSAGE_CHARS, TRUNCATION_MARKER,
};

// Re-export the trait next to its implementations
pub use crate::core::Transport;
