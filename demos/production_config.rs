//! Production configuration example
//!
//! Structured JSON output at info level, with deployment metadata taken from
//! `APP_VERSION` and `APP_REGION` merged into every entry.
//!
//! Run with: APP_VERSION=1.0.0 APP_REGION=us-east-1 cargo run --example production_config

use rust_notify_logger::prelude::*;
use std::fmt;

#[derive(Debug)]
struct GatewayTimeout;

impl fmt::Display for GatewayTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payment gateway timeout")
    }
}

impl std::error::Error for GatewayTimeout {}

fn main() -> Result<()> {
    let registry = LoggerRegistry::new();

    let base = registry.get_logger(Some("production-app"));
    base.use_json_format().set_level(LogLevel::Info);

    let logger = base.child(
        context! {
            "environment" => "production",
            "service" => "api-service",
        }
        .merged(&AppMetadata::from_env().to_context()),
    );

    logger.info_with(
        "Application started",
        context! { "startupTime" => chrono::Utc::now().timestamp_millis() },
    );

    // Below the info threshold
    logger.debug_with(
        "DB connection pool initialized",
        context! { "poolSize" => 10, "maxConnections" => 100 },
    );

    logger.info_with(
        "Processing payment request",
        context! {
            "paymentId" => "pay_123456",
            "amount" => 100.50,
            "currency" => "USD",
            "customerId" => "cust_42",
        },
    );

    logger.error_with_error(
        "Payment processing failed",
        context! {
            "paymentId" => "pay_123456",
            "errorCode" => "GATEWAY_TIMEOUT",
            "retryCount" => 2,
            "processingTimeMs" => 3200,
        },
        ErrorInfo::from_error(&GatewayTimeout),
    );

    logger.fatal_with(
        "Database connection lost",
        context! {
            "dbHost" => "primary-db.example.com",
            "connectionId" => "conn_789",
            "failoverStatus" => "INITIATED",
        },
    );

    Ok(())
}
