//! Error types for the logger system

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Style table or template misconfiguration
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Log directory or file could not be created
    #[error("Failed to create log '{path}': {message}")]
    Creation {
        path: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a line into the log file failed
    #[error("Failed to write into log '{path}'")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reopening the log file after rotation failed
    #[error("Failed to reload log '{path}'")]
    Reload {
        path: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// The file handle was already released
    #[error("Log '{path}' is already finalized")]
    Finalized { path: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a creation error for a log path
    pub fn creation(path: &Path, message: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Creation {
            path: path.display().to_string(),
            message: message.into(),
            source,
        }
    }

    /// Create a write error for a log path
    pub fn write(path: &Path, source: std::io::Error) -> Self {
        LoggerError::Write {
            path: path.display().to_string(),
            source,
        }
    }

    /// Wrap the failure that prevented a reload
    pub fn reload(path: &Path, source: LoggerError) -> Self {
        LoggerError::Reload {
            path: path.display().to_string(),
            source: Box::new(source),
        }
    }

    pub fn finalized(path: &Path) -> Self {
        LoggerError::Finalized {
            path: path.display().to_string(),
        }
    }

    /// True for errors raised while building a logger or its style table
    pub fn is_configuration(&self) -> bool {
        matches!(self, LoggerError::InvalidConfiguration { .. })
    }
}
