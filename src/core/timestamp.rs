//! Timestamp formatting for rendered log lines
//!
//! Every rendered line stamps the wall clock at render time. The default
//! format keeps microseconds so rapid successive lines stay distinguishable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options substituted into `{timestamp}` template sites
///
/// # Examples
///
/// ```
/// use strict_logger::TimestampFormat;
///
/// let format = TimestampFormat::Iso8601Micros;
/// let stamp = format.now();
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    #[default]
    Iso8601Micros,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// ```
    /// use strict_logger::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
            }
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current instant
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }
}
