//! Console and file sinks

pub mod console;
pub mod file;

pub use console::ConsoleAppender;
pub use file::{FileAppender, OpenMode};
