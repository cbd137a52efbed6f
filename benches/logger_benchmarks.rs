//! Criterion benchmarks for rust_notify_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_notify_logger::prelude::*;
use std::sync::Arc;

fn bench_logger(level: LogLevel, formatter: Formatter) -> Logger {
    Logger::builder()
        .min_level(level)
        .formatter(formatter)
        .console(Arc::new(NullConsole))
        .build()
}

/// Console that drops every line
struct NullConsole;

impl ConsoleSink for NullConsole {
    fn write_line(&self, _channel: ConsoleChannel, line: &str) {
        black_box(line);
    }
}

fn sample_entry() -> LogEntry {
    LogEntry::new(LogLevel::Warn, "Payment processing issue")
        .with_context(context! {
            "service" => "payment",
            "paymentId" => "pay_123456",
            "amount" => 100.5,
            "retries" => 3,
        })
        .with_error(ErrorInfo::new("TimeoutError", "gateway timeout"))
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("new", |b| {
        b.iter(|| {
            let logger = Logger::new();
            black_box(logger)
        });
    });

    let parent = Logger::builder().field("app", "bench").build();
    group.bench_function("child", |b| {
        b.iter(|| {
            let child = parent.child(context! { "module" => "auth" });
            black_box(child)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let json = bench_logger(LogLevel::Debug, Formatter::Json);
    let pretty = bench_logger(LogLevel::Debug, Formatter::pretty(false));

    group.bench_function("json_info", |b| {
        b.iter(|| {
            json.info(black_box("Info message"));
        });
    });

    group.bench_function("json_info_with_context", |b| {
        b.iter(|| {
            json.info_with(
                black_box("User action"),
                context! { "userId" => "123", "action" => "login" },
            );
        });
    });

    group.bench_function("pretty_info", |b| {
        b.iter(|| {
            pretty.info(black_box("Info message"));
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let entry = sample_entry();

    group.bench_function("json", |b| {
        b.iter(|| black_box(Formatter::Json.format(black_box(&entry))));
    });

    group.bench_function("pretty_plain", |b| {
        let formatter = Formatter::pretty(false);
        b.iter(|| black_box(formatter.format(black_box(&entry))));
    });

    group.bench_function("pretty_colored", |b| {
        let formatter = Formatter::pretty(true);
        b.iter(|| black_box(formatter.format(black_box(&entry))));
    });

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = bench_logger(LogLevel::Warn, Formatter::Json);

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("This should be filtered"));
        });
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| {
            logger.error(black_box("This should be logged"));
        });
    });

    group.finish();
}

// ============================================================================
// Transport Benchmarks
// ============================================================================

struct DiscardClient;

impl NotificationClient for DiscardClient {
    fn send_message(&self, _chat_id: &str, text: &str) -> Result<()> {
        black_box(text);
        Ok(())
    }
}

fn bench_transport(c: &mut Criterion) {
    let mut group = c.benchmark_group("transport");
    group.throughput(Throughput::Elements(1));

    let logger = bench_logger(LogLevel::Debug, Formatter::Json);
    let transport = TelegramTransport::with_client(
        TelegramTransportOptions::new("token", "chat")
            .min_level(LogLevel::Error)
            .delivery(DeliveryMode::Inline),
        Arc::new(DiscardClient),
    );
    logger.add_transport(Arc::new(transport));

    group.bench_function("filtered_by_transport", |b| {
        b.iter(|| {
            logger.info(black_box("Console only"));
        });
    });

    group.bench_function("inline_delivery", |b| {
        b.iter(|| {
            logger.error(black_box("Console and transport"));
        });
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(bench_logger(LogLevel::Info, Formatter::Json));

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_formatting,
    bench_level_filtering,
    bench_transport,
    bench_concurrent_logging
);

criterion_main!(benches);
