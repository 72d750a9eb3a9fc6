//! # Strict Logger
//!
//! A concurrency-safe file logger. One instance can be shared by many threads;
//! every call is serialized on the instance, so lines never interleave.
//!
//! ## Features
//!
//! - **Level Gating**: independent console and file thresholds over any ordered level type
//! - **Lazy Messages**: the message closure only runs when some sink accepts it
//! - **Style Tables**: per-level console and file templates, validated up front
//! - **Rotation Recovery**: `reload()` recreates the file after an external rename
//! - **Buffering**: `BufferedLogger` defers file writes until `finalize()`

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, OpenMode};
    pub use crate::core::{
        BufferedLogger, Level, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Result, Sink, StrictLogger, StyleEntry, StyleTable, Template,
        TimestampFormat,
    };
}

pub use crate::appenders::{ConsoleAppender, FileAppender, OpenMode};
pub use crate::core::{
    BufferedLogger, Level, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Result, Sink, StrictLogger, StyleEntry, StyleTable, Template, Thresholds,
    TimestampFormat,
};
