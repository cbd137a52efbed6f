//! Telegram transport example
//!
//! Forwards error-level entries, plus entries matching a predicate, to a
//! Telegram chat. Everything still goes to the console.
//!
//! Run with: TELEGRAM_BOT_TOKEN=... TELEGRAM_CHAT_ID=... cargo run --example telegram_transport

use rust_notify_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    let token = std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();
    let chat_id = std::env::var("TELEGRAM_CHAT_ID").unwrap_or_default();

    let registry = LoggerRegistry::new();
    let logger = registry.get_logger(Some("app"));

    // An empty token leaves the transport disabled with a single warning
    let transport = Arc::new(TelegramTransport::new(
        TelegramTransportOptions::new(token, chat_id)
            .min_level(LogLevel::Info)
            .delivery(DeliveryMode::Inline)
            .filter(|entry| {
                entry.level >= LogLevel::Error
                    || entry.message.contains("critical")
                    || entry.context.get("service") == Some(&FieldValue::from("payment"))
            }),
    ));
    logger.add_transport(transport.clone());

    // Console only
    logger.info("Application started");
    logger.debug("This is a debug message");

    logger.error_with(
        "Critical system failure detected!",
        context! { "service" => "auth", "userId" => "12345" },
    );

    // Matches the service predicate
    logger.warn_with(
        "Payment processing issue",
        context! { "service" => "payment", "orderId" => "ORD-123" },
    );

    // Matches the message predicate
    logger.info_with(
        "Processing critical user data",
        context! { "service" => "user", "count" => 42 },
    );

    let metrics = transport.metrics();
    println!(
        "\ntelegram: delivered={} failed={} filtered={}",
        metrics.delivered_count(),
        metrics.failed_count(),
        metrics.filtered_count()
    );

    Ok(())
}
