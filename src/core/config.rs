//! Serializable logger configuration
//!
//! ```
//! use strict_logger::prelude::*;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "path": "logs/service.log",
//!     "mode": "Rewrite",
//!     "console_threshold": "Warning"
//! }"#)?;
//! assert_eq!(config.file_threshold, LogLevel::Notice);
//! # Ok::<(), LoggerError>(())
//! ```

use super::{
    error::Result,
    log_level::LogLevel,
    strict::{LoggerBuilder, StrictLogger},
    timestamp::TimestampFormat,
};
use crate::appenders::OpenMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub mode: OpenMode,
    #[serde(default)]
    pub console_threshold: LogLevel,
    #[serde(default)]
    pub file_threshold: LogLevel,
    #[serde(default)]
    pub timestamp_format: TimestampFormat,
}

impl LoggerConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: OpenMode::default(),
            console_threshold: LogLevel::default(),
            file_threshold: LogLevel::default(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn builder(&self) -> LoggerBuilder<LogLevel> {
        StrictLogger::builder(self.path.clone())
            .mode(self.mode)
            .console_threshold(self.console_threshold)
            .file_threshold(self.file_threshold)
            .timestamp_format(self.timestamp_format.clone())
    }

    /// Open a logger with the default styles
    pub fn open(&self) -> Result<StrictLogger> {
        self.builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Logger, LoggerError};
    use tempfile::TempDir;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = LoggerConfig::from_json(r#"{"path": "app.log"}"#).expect("parse");
        assert_eq!(config, LoggerConfig::new("app.log"));
        assert_eq!(config.mode, OpenMode::Append);
        assert_eq!(config.timestamp_format, TimestampFormat::Iso8601Micros);
    }

    #[test]
    fn test_full_json() {
        let config = LoggerConfig::from_json(
            r#"{
                "path": "/var/log/app.log",
                "mode": "Rewrite",
                "console_threshold": "Muted",
                "file_threshold": "Debug",
                "timestamp_format": "Rfc3339"
            }"#,
        )
        .expect("parse");

        assert_eq!(config.mode, OpenMode::Rewrite);
        assert_eq!(config.console_threshold, LogLevel::Muted);
        assert_eq!(config.file_threshold, LogLevel::Debug);
        assert_eq!(config.timestamp_format, TimestampFormat::Rfc3339);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = LoggerConfig::from_json(r#"{"path": "a.log", "file_threshold": "Loud"}"#)
            .unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_json_file_opens_logger() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = LoggerConfig::new(temp_dir.path().join("logs").join("app.log"));
        config.file_threshold = LogLevel::Warning;
        let config_path = temp_dir.path().join("logger.json");
        fs::write(&config_path, config.to_json().expect("serialize")).expect("write config");

        let logger = LoggerConfig::from_json_file(&config_path)
            .expect("load")
            .open()
            .expect("open");

        assert_eq!(logger.file_threshold(), LogLevel::Warning);
        assert_eq!(logger.name(), temp_dir.path().join("logs").join("app.log"));
    }
}
