//! File appender implementation
//!
//! Owns the single open handle of a logger. The handle is opened eagerly,
//! parent directories are created on demand, and the appender can reopen
//! itself at the same path after an external rotation.

use crate::core::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// How an existing log file is treated when it is opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenMode {
    /// Keep existing content and write after it
    #[default]
    Append,
    /// Truncate or create a fresh file
    Rewrite,
}

#[derive(Debug)]
pub struct FileAppender {
    path: PathBuf,
    mode: OpenMode,
    writer: Option<BufWriter<File>>,
}

impl FileAppender {
    /// Open `path` with `mode`, creating missing parent directories
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Creation`] if the directory or the file cannot be created.
    pub fn open(path: impl Into<PathBuf>, mode: OpenMode) -> Result<Self> {
        let path = path.into();
        let writer = Some(Self::open_writer(&path, mode)?);
        Ok(Self { path, mode, writer })
    }

    fn open_writer(path: &Path, mode: OpenMode) -> Result<BufWriter<File>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::creation(
                    path,
                    format!("cannot create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            OpenMode::Append => options.append(true),
            OpenMode::Rewrite => options.write(true).truncate(true),
        };

        let file = options
            .open(path)
            .map_err(|e| LoggerError::creation(path, "cannot open file", e))?;
        Ok(BufWriter::new(file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// True while a file exists at the configured path
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write one line and a terminator, then flush it to the file
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::finalized(&self.path))?;

        let mut output = String::with_capacity(line.len() + 1);
        output.push_str(line);
        output.push('\n');

        writer
            .write_all(output.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::write(&self.path, e))
    }

    /// Replace the handle with a fresh one at the same path and mode
    pub fn reopen(&mut self) -> Result<()> {
        let writer = Self::open_writer(&self.path, self.mode)?;
        if let Some(mut old) = self.writer.replace(writer) {
            let _ = old.flush();
        }
        Ok(())
    }

    /// Point the appender at a new path, keeping the open mode.
    ///
    /// The current handle is kept if the new file cannot be opened. Once the
    /// new handle is in place, a failed flush of the old one is only reported.
    pub fn retarget(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let writer = Self::open_writer(&path, self.mode)?;
        let old_path = std::mem::replace(&mut self.path, path);
        if let Some(mut old) = self.writer.replace(writer) {
            if let Err(e) = old.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush '{}': {}", old_path.display(), e);
            }
        }
        Ok(())
    }

    /// Flush and release the handle. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| LoggerError::write(&self.path, e))?;
        }
        Ok(())
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!("[LOGGER ERROR] Failed to flush '{}': {}", self.path.display(), e);
        }
    }
}
