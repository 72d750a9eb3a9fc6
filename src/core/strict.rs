//! File logger with level gating and rotation recovery

use super::{
    error::{LoggerError, Result},
    log_level::{Level, LogLevel},
    logger::{dispatch, report_write_failure, Delivery, Logger, Thresholds},
    metrics::LoggerMetrics,
    style::StyleTable,
    timestamp::TimestampFormat,
};
use crate::appenders::{ConsoleAppender, FileAppender, OpenMode};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct StrictState<L: Level> {
    file: FileAppender,
    console: ConsoleAppender,
    thresholds: Thresholds<L>,
    finalized: bool,
}

/// A logger writing every accepted message to one file and optionally to the console.
///
/// All operations lock the instance for their whole duration, so lines from
/// concurrent callers never interleave.
///
/// # Example
///
/// ```no_run
/// use strict_logger::prelude::*;
///
/// let logger = StrictLogger::builder("logs/app.log")
///     .mode(OpenMode::Rewrite)
///     .console_threshold(LogLevel::Warning)
///     .file_threshold(LogLevel::Notice)
///     .build()?;
///
/// logger.log(LogLevel::Notice, || "service started");
/// # Ok::<(), LoggerError>(())
/// ```
pub struct StrictLogger<L: Level = LogLevel> {
    state: Mutex<StrictState<L>>,
    styles: Arc<StyleTable<L>>,
    metrics: LoggerMetrics,
}

impl StrictLogger<LogLevel> {
    /// Open a logger with the default style table and both thresholds at `Notice`
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Creation`] if the file or its directory cannot be created.
    pub fn open(path: impl Into<PathBuf>, mode: OpenMode) -> Result<Self> {
        Self::builder(path).mode(mode).build()
    }

    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> LoggerBuilder<LogLevel> {
        LoggerBuilder::new(path)
    }

    #[inline]
    pub fn notice<M: Into<String>>(&self, message: impl FnOnce() -> M) {
        self.log(LogLevel::Notice, message);
    }

    #[inline]
    pub fn warning<M: Into<String>>(&self, message: impl FnOnce() -> M) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn debug<M: Into<String>>(&self, message: impl FnOnce() -> M) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn fatal<M: Into<String>>(&self, message: impl FnOnce() -> M) {
        self.log(LogLevel::Fatal, message);
    }
}

impl<L: Level> StrictLogger<L> {
    /// Open a logger over a custom level enumeration and style table
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Creation`] if the file or its directory cannot be created.
    pub fn with_styles(
        path: impl Into<PathBuf>,
        mode: OpenMode,
        styles: StyleTable<L>,
    ) -> Result<Self> {
        LoggerBuilder::new(path).mode(mode).styles(styles).build()
    }

    pub fn mode(&self) -> OpenMode {
        self.state.lock().file.mode()
    }

    pub fn is_finalized(&self) -> bool {
        self.state.lock().finalized
    }

    /// Get the logger metrics
    ///
    /// ```no_run
    /// use strict_logger::prelude::*;
    ///
    /// let logger = StrictLogger::open("app.log", OpenMode::Append)?;
    /// logger.log(LogLevel::Notice, || "hello");
    /// println!("written: {}", logger.metrics().lines_written());
    /// # Ok::<(), LoggerError>(())
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl<L: Level> Logger<L> for StrictLogger<L> {
    fn name(&self) -> PathBuf {
        self.state.lock().file.path().to_path_buf()
    }

    fn set_name<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut state = self.state.lock();
        if state.file.path() == path {
            return Ok(());
        }
        if state.finalized {
            return Err(LoggerError::finalized(state.file.path()));
        }
        state.file.retarget(path)
    }

    fn console_threshold(&self) -> L {
        self.state.lock().thresholds.console
    }

    fn set_console_threshold(&self, level: L) {
        self.state.lock().thresholds.console = level;
    }

    fn file_threshold(&self) -> L {
        self.state.lock().thresholds.file
    }

    fn set_file_threshold(&self, level: L) {
        self.state.lock().thresholds.file = level;
    }

    fn log<M, F>(&self, level: L, message: F)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        let mut guard = self.state.lock();
        let StrictState {
            file,
            console,
            thresholds,
            ..
        } = &mut *guard;
        let thresholds = *thresholds;

        let delivery = dispatch(&self.styles, thresholds, console, level, message, |line| {
            file.write_line(&line)
        });
        match delivery {
            Delivery::Filtered => {
                self.metrics.record_filtered();
            }
            Delivery::ConsoleOnly => {}
            Delivery::Written => {
                self.metrics.record_written();
            }
            Delivery::FileFailed => {
                self.metrics.record_write_failure();
                report_write_failure(console, thresholds, file.path());
            }
        }
    }

    fn raw_input(&self, line: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.file.write_line(line)?;
        self.metrics.record_written();
        Ok(())
    }

    fn reload(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.finalized || state.file.exists() {
            return Ok(());
        }
        match state.file.reopen() {
            Ok(()) => Ok(()),
            Err(e) => Err(LoggerError::reload(state.file.path(), e)),
        }
    }

    fn finalize(&self) {
        let mut state = self.state.lock();
        if state.finalized {
            return;
        }
        state.finalized = true;
        if let Err(e) = state.file.close() {
            eprintln!("[LOGGER ERROR] Failed to flush during finalize: {}", e);
        }
        let _ = state.console.flush();
    }

    fn style_table(&self) -> Arc<StyleTable<L>> {
        Arc::clone(&self.styles)
    }
}

impl<L: Level> Drop for StrictLogger<L> {
    fn drop(&mut self) {
        self.finalize();
    }
}

/// Builder for constructing a [`StrictLogger`] with a fluent API
///
/// # Example
/// ```no_run
/// use strict_logger::prelude::*;
///
/// let logger = StrictLogger::builder("/var/log/app/service.log")
///     .mode(OpenMode::Append)
///     .console_threshold(LogLevel::Muted)
///     .file_threshold(LogLevel::Warning)
///     .timestamp_format(TimestampFormat::Rfc3339)
///     .build()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerBuilder<L: Level = LogLevel> {
    path: PathBuf,
    mode: OpenMode,
    thresholds: Thresholds<L>,
    styles: Option<StyleTable<L>>,
    timestamp_format: Option<TimestampFormat>,
    console: ConsoleAppender,
}

impl<L: Level> LoggerBuilder<L> {
    /// Create a new builder: append mode, lowest thresholds, labelled styles, stdout
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: OpenMode::default(),
            thresholds: Thresholds::default(),
            styles: None,
            timestamp_format: None,
            console: ConsoleAppender::stdout(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_threshold(mut self, level: L) -> Self {
        self.thresholds.console = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_threshold(mut self, level: L) -> Self {
        self.thresholds.file = level;
        self
    }

    /// Use a validated style table instead of the labelled default
    #[must_use = "builder methods return a new value"]
    pub fn styles(mut self, styles: StyleTable<L>) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Override the timestamp format of the style table
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Send console output somewhere other than stdout
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: ConsoleAppender) -> Self {
        self.console = console;
        self
    }

    /// Open the file and build the logger
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Creation`] if the file or its directory cannot be created.
    pub fn build(self) -> Result<StrictLogger<L>> {
        let mut styles = self.styles.unwrap_or_else(StyleTable::labelled);
        if let Some(format) = self.timestamp_format {
            styles = styles.with_timestamp_format(format);
        }
        let file = FileAppender::open(self.path, self.mode)?;

        Ok(StrictLogger {
            state: Mutex::new(StrictState {
                file,
                console: self.console,
                thresholds: self.thresholds,
                finalized: false,
            }),
            styles: Arc::new(styles),
            metrics: LoggerMetrics::new(),
        })
    }
}
