//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// An ordered severity enumeration a logger can be parameterized over.
///
/// `all()` must list every member exactly once; style tables are validated
/// against it. `muted()` is the threshold sentinel that switches a sink off.
pub trait Level: Copy + Ord + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn all() -> &'static [Self];

    fn muted() -> Self;

    /// Label used by the default templates
    fn label(&self) -> &'static str;

    /// Lowest member of the ordering
    fn lowest() -> Self {
        Self::all().iter().copied().min().unwrap_or_else(Self::muted)
    }

    fn is_muted(&self) -> bool {
        *self == Self::muted()
    }
}

/// Returns true when a message at `level` should reach a sink gated by `threshold`.
#[inline]
pub fn passes<L: Level>(level: L, threshold: L) -> bool {
    !threshold.is_muted() && level >= threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Notice = 0,
    Warning = 1,
    Debug = 2,
    Fatal = 3,
    Muted = 4,
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Notice => "Notice",
            LogLevel::Warning => "Warning",
            LogLevel::Debug => "Debug",
            LogLevel::Fatal => "Fatal",
            LogLevel::Muted => "",
        }
    }
}

impl Level for LogLevel {
    fn all() -> &'static [Self] {
        &[
            LogLevel::Notice,
            LogLevel::Warning,
            LogLevel::Debug,
            LogLevel::Fatal,
            LogLevel::Muted,
        ]
    }

    fn muted() -> Self {
        LogLevel::Muted
    }

    fn label(&self) -> &'static str {
        self.to_str()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOTICE" => Ok(LogLevel::Notice),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "DEBUG" => Ok(LogLevel::Debug),
            "FATAL" => Ok(LogLevel::Fatal),
            "MUTED" => Ok(LogLevel::Muted),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
