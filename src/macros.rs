//! Logging macros for ergonomic, lazily formatted messages.
//!
//! The format arguments are wrapped in a closure, so nothing is formatted
//! when the level is filtered out by both thresholds.
//!
//! # Examples
//!
//! ```no_run
//! use strict_logger::prelude::*;
//! use strict_logger::{notice, fatal};
//!
//! let logger = StrictLogger::open("app.log", OpenMode::Append)?;
//!
//! notice!(logger, "Server started");
//! let port = 8080;
//! notice!(logger, "Listening on port {}", port);
//! fatal!(logger, "Cannot bind {}", port);
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message at an explicit level.
///
/// ```no_run
/// # use strict_logger::prelude::*;
/// # let logger = StrictLogger::open("app.log", OpenMode::Append)?;
/// use strict_logger::log;
/// log!(logger, LogLevel::Warning, "Retry attempt {} of {}", 3, 5);
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.log($level, || format!($($arg)+))
    }};
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
