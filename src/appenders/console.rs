//! Console appender implementation

use crate::core::Result;
use std::fmt;
use std::io::{self, Write};

enum Target {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

/// Mirror sink writing rendered lines to a console stream
pub struct ConsoleAppender {
    target: Target,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::stdout()
    }

    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            target: Target::Stderr,
        }
    }

    /// Write into an arbitrary stream, e.g. an in-memory buffer in tests
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            target: Target::Writer(Box::new(writer)),
        }
    }

    /// Write one line followed by a line terminator
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        match &mut self.target {
            Target::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", line)?;
            }
            Target::Stderr => {
                let mut err = io::stderr().lock();
                writeln!(err, "{}", line)?;
            }
            Target::Writer(writer) => {
                writeln!(writer, "{}", line)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Stderr => io::stderr().flush()?,
            Target::Writer(writer) => writer.flush()?,
        }
        Ok(())
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            Target::Stdout => "stdout",
            Target::Stderr => "stderr",
            Target::Writer(_) => "writer",
        };
        f.debug_struct("ConsoleAppender").field("target", &target).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_target_receives_lines() {
        let buffer = Shared::default();
        let mut appender = ConsoleAppender::with_writer(buffer.clone());

        appender.write_line("Notice: one").expect("write");
        appender.write_line("Notice: two").expect("write");
        appender.flush().expect("flush");

        let text = String::from_utf8(buffer.0.lock().clone()).expect("utf8");
        assert_eq!(text, "Notice: one\nNotice: two\n");
    }

    #[test]
    fn test_debug_names_target() {
        assert!(format!("{:?}", ConsoleAppender::stderr()).contains("stderr"));
    }
}
