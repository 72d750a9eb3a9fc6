//! Buffered logging example
//!
//! Collects the lines of one job in memory and writes them in one go when the
//! job finishes.
//!
//! Run with: cargo run --example buffered_logging

use std::sync::Arc;
use strict_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Strict Logger - Buffered Logging Example ===\n");

    let file = StrictLogger::builder("demo-logs/jobs.log")
        .console_threshold(LogLevel::Muted)
        .build()?;
    let file = Arc::new(file);

    for job in 1..=3 {
        let buffered = BufferedLogger::new(Arc::clone(&file));
        for step in 1..=3 {
            buffered.log(LogLevel::Notice, || format!("job {} step {}", job, step));
        }
        println!("job {}: {} lines buffered", job, buffered.pending());
        buffered.finalize();
    }

    println!("\n=== Example completed successfully! ===");
    println!("Check 'demo-logs/jobs.log' for the grouped output");

    Ok(())
}
