//! The capability set shared by every logger variant

use super::{
    error::Result,
    log_level::{passes, Level},
    style::{Sink, StyleTable},
};
use crate::appenders::ConsoleAppender;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Contract satisfied by [`StrictLogger`](super::StrictLogger) and
/// [`BufferedLogger`](super::BufferedLogger).
///
/// Every method takes `&self`; implementations serialize calls on one
/// instance internally, so a logger can be shared between threads behind an
/// `Arc` without further locking.
pub trait Logger<L: Level>: Send + Sync {
    /// Path of the log file
    fn name(&self) -> PathBuf;

    /// Move the log to `path`. Setting the current path again does nothing.
    fn set_name<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    fn console_threshold(&self) -> L;

    fn set_console_threshold(&self, level: L);

    fn file_threshold(&self) -> L;

    fn set_file_threshold(&self, level: L);

    /// Log a lazily produced message at `level`.
    ///
    /// `message` runs at most once, and only when at least one sink accepts
    /// `level`. Failures while writing the file never reach the caller.
    fn log<M, F>(&self, level: L, message: F)
    where
        F: FnOnce() -> M,
        M: Into<String>;

    /// Write one preformatted line to the file sink, bypassing gating and styles
    fn raw_input(&self, line: &str) -> Result<()>;

    /// Recreate the log file if it disappeared from its path
    fn reload(&self) -> Result<()>;

    /// Flush and release resources. Later calls do nothing.
    fn finalize(&self);

    fn style_table(&self) -> Arc<StyleTable<L>>;
}

impl<L: Level, G: Logger<L>> Logger<L> for Arc<G> {
    fn name(&self) -> PathBuf {
        (**self).name()
    }

    fn set_name<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        (**self).set_name(path)
    }

    fn console_threshold(&self) -> L {
        (**self).console_threshold()
    }

    fn set_console_threshold(&self, level: L) {
        (**self).set_console_threshold(level)
    }

    fn file_threshold(&self) -> L {
        (**self).file_threshold()
    }

    fn set_file_threshold(&self, level: L) {
        (**self).set_file_threshold(level)
    }

    fn log<M, F>(&self, level: L, message: F)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        (**self).log(level, message)
    }

    fn raw_input(&self, line: &str) -> Result<()> {
        (**self).raw_input(line)
    }

    fn reload(&self) -> Result<()> {
        (**self).reload()
    }

    fn finalize(&self) {
        (**self).finalize()
    }

    fn style_table(&self) -> Arc<StyleTable<L>> {
        (**self).style_table()
    }
}

/// Console and file thresholds of one logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds<L: Level> {
    pub console: L,
    pub file: L,
}

impl<L: Level> Thresholds<L> {
    pub fn new(console: L, file: L) -> Self {
        Self { console, file }
    }

    pub fn accepts_console(&self, level: L) -> bool {
        passes(level, self.console)
    }

    pub fn accepts_file(&self, level: L) -> bool {
        passes(level, self.file)
    }
}

impl<L: Level> Default for Thresholds<L> {
    fn default() -> Self {
        Self::new(L::lowest(), L::lowest())
    }
}

/// What happened to one `log` call
#[derive(Debug)]
pub(crate) enum Delivery {
    Filtered,
    ConsoleOnly,
    Written,
    FileFailed,
}

/// Gate, render and route one message. The file line is handed to `write_file`.
pub(crate) fn dispatch<L, M, F, W>(
    styles: &StyleTable<L>,
    thresholds: Thresholds<L>,
    console: &mut ConsoleAppender,
    level: L,
    message: F,
    write_file: W,
) -> Delivery
where
    L: Level,
    F: FnOnce() -> M,
    M: Into<String>,
    W: FnOnce(String) -> Result<()>,
{
    let to_console = thresholds.accepts_console(level);
    let to_file = thresholds.accepts_file(level);
    if !to_console && !to_file {
        return Delivery::Filtered;
    }

    let message: String = message().into();

    if to_console {
        let line = styles.render(&message, level, Sink::Console);
        if let Err(e) = console.write_line(&line) {
            eprintln!("[LOGGER ERROR] Console write failed: {}", e);
        }
    }

    if !to_file {
        return Delivery::ConsoleOnly;
    }
    match write_file(styles.render(&message, level, Sink::File)) {
        Ok(()) => Delivery::Written,
        Err(_) => Delivery::FileFailed,
    }
}

/// Best-effort notice that a line could not be written into `name`
pub(crate) fn report_write_failure<L: Level>(
    console: &mut ConsoleAppender,
    thresholds: Thresholds<L>,
    name: &Path,
) {
    if thresholds.console.is_muted() {
        return;
    }
    let _ = console.write_line(&format!("failed to write into log {}", name.display()));
}
