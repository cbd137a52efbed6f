//! Basic logger usage example
//!
//! Demonstrates the shared registry, named and child loggers, context,
//! errors, and switching between JSON and pretty output.
//!
//! Run with: cargo run --example basic_usage

use rust_notify_logger::prelude::*;
use rust_notify_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Notify Logger - Basic Usage Example ===\n");

    let registry = LoggerRegistry::new();

    // The unnamed logger is shared
    println!("1. Default logger:");
    let logger = registry.get_logger(None);
    logger.info("Application started");
    logger.warn("This is a warning message");
    logger.error_with("An error occurred", context! { "code" => 500 });

    // Named loggers carry a loggerName field
    println!("\n2. Named logger with context and errors:");
    let user_logger = registry.get_logger(Some("user-service"));
    user_logger.info_with("User logged in", context! { "userId" => "user123", "role" => "admin" });

    let failure = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Authentication failed");
    user_logger.error_with_error(
        "Login failed",
        context! { "userId" => "user456" },
        ErrorInfo::from_error(&failure),
    );

    // Hidden at the default info threshold
    user_logger.debug_with("Debug information", context! { "debug" => true });

    println!("\n3. Child logger:");
    let request_logger = user_logger.child(context! {
        "requestId" => "req-123-456",
        "path" => "/api/users",
        "method" => "GET",
    });
    request_logger.info("Request received");
    info!(request_logger, { "elapsedMs" => 12 }, "Request handled in {}ms", 12);

    println!("\n4. JSON at debug level:");
    let json_logger = registry.get_logger(Some("api"));
    json_logger.use_json_format().set_level(LogLevel::Debug);
    json_logger.debug("This is in JSON format");

    println!("\n5. Pretty format with colors:");
    let pretty_logger = registry.get_logger(Some("ui"));
    pretty_logger.use_pretty_format(true);
    pretty_logger.info("This is in pretty format with colors");
    warn!(pretty_logger, "Warning in pretty format");
    pretty_logger.error("Error in pretty format");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
