//! Deferred-write decorator
//!
//! [`BufferedLogger`] gates and renders exactly like the logger it wraps, but
//! keeps file lines in memory until [`Logger::finalize`] replays them.

use super::{
    error::Result,
    log_level::{Level, LogLevel},
    logger::{dispatch, report_write_failure, Delivery, Logger, Thresholds},
    style::StyleTable,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct BufferState<L: Level> {
    pending: Vec<String>,
    console: ConsoleAppender,
    thresholds: Thresholds<L>,
    finalized: bool,
}

/// Buffers file output of an inner logger until `finalize`
///
/// # Example
///
/// ```no_run
/// use strict_logger::prelude::*;
/// use std::sync::Arc;
///
/// let file = Arc::new(StrictLogger::open("job.log", OpenMode::Rewrite)?);
/// let buffered = BufferedLogger::new(Arc::clone(&file));
///
/// buffered.log(LogLevel::Notice, || "step 1");
/// buffered.log(LogLevel::Notice, || "step 2");
/// // job.log is still empty here
/// buffered.finalize();
/// # Ok::<(), LoggerError>(())
/// ```
pub struct BufferedLogger<G: Logger<L>, L: Level = LogLevel> {
    inner: G,
    state: Mutex<BufferState<L>>,
    styles: Arc<StyleTable<L>>,
}

impl<G: Logger<L>, L: Level> BufferedLogger<G, L> {
    /// Wrap `inner`, copying its thresholds and style table
    pub fn new(inner: G) -> Self {
        let thresholds = Thresholds::new(inner.console_threshold(), inner.file_threshold());
        let styles = inner.style_table();
        Self {
            inner,
            state: Mutex::new(BufferState {
                pending: Vec::new(),
                console: ConsoleAppender::stdout(),
                thresholds,
                finalized: false,
            }),
            styles,
        }
    }

    /// Send console output somewhere other than stdout
    #[must_use]
    pub fn with_console(self, console: ConsoleAppender) -> Self {
        self.state.lock().console = console;
        self
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of lines waiting for `finalize`
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_finalized(&self) -> bool {
        self.state.lock().finalized
    }
}

impl<G: Logger<L>, L: Level> Logger<L> for BufferedLogger<G, L> {
    fn name(&self) -> PathBuf {
        self.inner.name()
    }

    fn set_name<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let _state = self.state.lock();
        self.inner.set_name(path)
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
        let BufferState {
            pending,
            console,
            thresholds,
            finalized,
        } = &mut *guard;
        let thresholds = *thresholds;
        let finalized = *finalized;

        let delivery = dispatch(&self.styles, thresholds, console, level, message, |line| {
            if finalized {
                self.inner.raw_input(&line)
            } else {
                pending.push(line);
                Ok(())
            }
        });
        if let Delivery::FileFailed = delivery {
            report_write_failure(console, thresholds, &self.inner.name());
        }
    }

    /// Append `line` to the buffer, or pass it straight through once finalized
    fn raw_input(&self, line: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.finalized {
            return self.inner.raw_input(line);
        }
        state.pending.push(line.to_string());
        Ok(())
    }

    fn reload(&self) -> Result<()> {
        let _state = self.state.lock();
        self.inner.reload()
    }

    /// Replay buffered lines, in order, into the inner logger
    fn finalize(&self) {
        let mut guard = self.state.lock();
        if guard.finalized {
            return;
        }
        guard.finalized = true;

        let BufferState {
            pending,
            console,
            thresholds,
            ..
        } = &mut *guard;
        let thresholds = *thresholds;
        for line in std::mem::take(pending) {
            if let Err(e) = self.inner.raw_input(&line) {
                if thresholds.console.is_muted() {
                    eprintln!("[LOGGER ERROR] Replay into '{}' failed: {}", self.inner.name().display(), e);
                } else {
                    report_write_failure(console, thresholds, &self.inner.name());
                }
            }
            if !thresholds.console.is_muted() {
                if let Err(e) = console.write_line(&line) {
                    eprintln!("[LOGGER ERROR] Console write failed: {}", e);
                }
            }
        }
        let _ = console.flush();
    }

    fn style_table(&self) -> Arc<StyleTable<L>> {
        Arc::clone(&self.styles)
    }
}

impl<G: Logger<L>, L: Level> Drop for BufferedLogger<G, L> {
    fn drop(&mut self) {
        self.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::OpenMode;
    use crate::core::{LoggerError, StrictLogger};
    use std::fs;
    use std::io::{self, Write};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().clone()).expect("utf8")
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn strict_in(dir: &TempDir) -> Arc<StrictLogger> {
        let logger = StrictLogger::builder(dir.path().join("test.log"))
            .mode(OpenMode::Rewrite)
            .console_threshold(LogLevel::Muted)
            .file_threshold(LogLevel::Notice)
            .console(ConsoleAppender::with_writer(Captured::default()))
            .build()
            .expect("Failed to create logger");
        Arc::new(logger)
    }

    /// Inner logger whose file sink always fails
    struct Broken {
        attempts: Mutex<Vec<String>>,
        styles: Arc<StyleTable<LogLevel>>,
    }

    impl Logger<LogLevel> for Broken {
        fn name(&self) -> PathBuf {
            PathBuf::from("broken.log")
        }
        fn set_name<P: AsRef<Path>>(&self, _path: P) -> Result<()> {
            Ok(())
        }
        fn console_threshold(&self) -> LogLevel {
            LogLevel::Notice
        }
        fn set_console_threshold(&self, _level: LogLevel) {}
        fn file_threshold(&self) -> LogLevel {
            LogLevel::Notice
        }
        fn set_file_threshold(&self, _level: LogLevel) {}
        fn log<M, F>(&self, _level: LogLevel, _message: F)
        where
            F: FnOnce() -> M,
            M: Into<String>,
        {
        }
        fn raw_input(&self, line: &str) -> Result<()> {
            self.attempts.lock().push(line.to_string());
            Err(LoggerError::finalized(Path::new("broken.log")))
        }
        fn reload(&self) -> Result<()> {
            Ok(())
        }
        fn finalize(&self) {}
        fn style_table(&self) -> Arc<StyleTable<LogLevel>> {
            Arc::clone(&self.styles)
        }
    }

    #[test]
    fn test_nothing_reaches_disk_before_finalize() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let strict = strict_in(&temp_dir);
        let buffered = BufferedLogger::new(Arc::clone(&strict))
            .with_console(ConsoleAppender::with_writer(Captured::default()));

        for message in ["a", "b", "c"] {
            buffered.log(LogLevel::Notice, || message);
        }

        let path = temp_dir.path().join("test.log");
        assert_eq!(buffered.pending(), 3);
        assert_eq!(fs::read_to_string(&path).expect("read"), "");

        buffered.finalize();
        buffered.finalize();

        let content = fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(":Notice: a"));
        assert!(lines[1].ends_with(":Notice: b"));
        assert!(lines[2].ends_with(":Notice: c"));
    }

    #[test]
    fn test_thresholds_copied_from_inner() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let strict = strict_in(&temp_dir);
        strict.set_file_threshold(LogLevel::Debug);

        let buffered = BufferedLogger::new(Arc::clone(&strict));
        assert_eq!(buffered.console_threshold(), LogLevel::Muted);
        assert_eq!(buffered.file_threshold(), LogLevel::Debug);

        buffered.log(LogLevel::Warning, || -> String { panic!("filtered") });
        assert_eq!(buffered.pending(), 0);
    }

    #[test]
    fn test_replay_mirrors_to_console() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let strict = strict_in(&temp_dir);
        let console = Captured::default();
        let buffered = BufferedLogger::new(Arc::clone(&strict))
            .with_console(ConsoleAppender::with_writer(console.clone()));
        buffered.set_console_threshold(LogLevel::Fatal);

        buffered.raw_input("raw one").expect("buffer");
        buffered.raw_input("raw two").expect("buffer");
        assert_eq!(console.text(), "");

        buffered.finalize();
        assert_eq!(console.text(), "raw one\nraw two\n");
    }

    #[test]
    fn test_replay_continues_after_failure() {
        let broken = Broken {
            attempts: Mutex::new(Vec::new()),
            styles: Arc::new(StyleTable::default()),
        };
        let console = Captured::default();
        let buffered =
            BufferedLogger::new(broken).with_console(ConsoleAppender::with_writer(console.clone()));
        buffered.set_console_threshold(LogLevel::Muted);

        buffered.raw_input("one").expect("buffer");
        buffered.raw_input("two").expect("buffer");
        buffered.finalize();

        assert_eq!(*buffered.inner().attempts.lock(), vec!["one", "two"]);
        assert_eq!(console.text(), "");
    }

    #[test]
    fn test_replay_failure_warns_per_line() {
        let broken = Broken {
            attempts: Mutex::new(Vec::new()),
            styles: Arc::new(StyleTable::default()),
        };
        let console = Captured::default();
        let buffered =
            BufferedLogger::new(broken).with_console(ConsoleAppender::with_writer(console.clone()));
        assert_eq!(buffered.console_threshold(), LogLevel::Notice);

        buffered.raw_input("one").expect("buffer");
        buffered.raw_input("two").expect("buffer");
        buffered.finalize();

        assert_eq!(*buffered.inner().attempts.lock(), vec!["one", "two"]);
        let text = console.text();
        assert_eq!(text.matches("failed to write into log broken.log").count(), 2);
        assert_eq!(
            text,
            "failed to write into log broken.log\none\n\
             failed to write into log broken.log\ntwo\n"
        );
    }

    #[test]
    fn test_drop_flushes_buffer() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let strict = strict_in(&temp_dir);
        {
            let buffered = BufferedLogger::new(Arc::clone(&strict));
            buffered.log(LogLevel::Fatal, || "last words");
        }

        let content = fs::read_to_string(temp_dir.path().join("test.log")).expect("read");
        assert!(content.trim_end().ends_with(":Fatal: last words"));
    }

    #[test]
    fn test_writes_pass_through_after_finalize() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let strict = strict_in(&temp_dir);
        let buffered = BufferedLogger::new(Arc::clone(&strict));

        buffered.finalize();
        buffered.log(LogLevel::Notice, || "after");

        assert_eq!(buffered.pending(), 0);
        let content = fs::read_to_string(temp_dir.path().join("test.log")).expect("read");
        assert!(content.contains(":Notice: after"));
    }
}
