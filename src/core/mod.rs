//! Core logger types and traits

pub mod buffered;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod strict;
pub mod style;
pub mod timestamp;

pub use buffered::BufferedLogger;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use log_level::{passes, Level, LogLevel};
pub use logger::{Logger, Thresholds};
pub use metrics::LoggerMetrics;
pub use strict::{LoggerBuilder, StrictLogger};
pub use style::{Sink, StyleEntry, StyleTable, Template};
pub use timestamp::TimestampFormat;
