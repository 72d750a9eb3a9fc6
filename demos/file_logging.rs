//! File logging example
//!
//! Demonstrates level gating across the console and file sinks, and
//! recovering after the log file is rotated away.
//!
//! Run with: cargo run --example file_logging

use strict_logger::prelude::*;
use strict_logger::{fatal, notice, warning};

fn main() -> Result<()> {
    println!("=== Strict Logger - File Logging Example ===\n");

    let logger = StrictLogger::builder("demo-logs/application.log")
        .mode(OpenMode::Rewrite)
        .console_threshold(LogLevel::Warning)
        .file_threshold(LogLevel::Notice)
        .build()?;

    println!("1. Notices go to the file only, warnings also reach the console:");
    notice!(logger, "Application started");
    notice!(logger, "Loading configuration...");
    warning!(logger, "Using default settings for some options");

    println!("\n2. Rotating the log file:");
    std::fs::rename("demo-logs/application.log", "demo-logs/application.log.1")?;
    logger.reload()?;
    notice!(logger, "Writing into a fresh file after rotation");

    println!("\n3. Expensive messages are skipped when filtered:");
    logger.set_file_threshold(LogLevel::Fatal);
    logger.log(LogLevel::Notice, || {
        println!("   (this is never printed)");
        "expensive"
    });
    fatal!(logger, "Shutting down after {} operations", 3);

    println!("\nLines written: {}", logger.metrics().lines_written());
    println!("\n=== Example completed successfully! ===");
    println!("Check 'demo-logs/application.log' and 'demo-logs/application.log.1'");

    Ok(())
}
