//! Per-level message styles
//!
//! A [`StyleTable`] maps every member of a [`Level`] enumeration to a pair of
//! templates, one for the console sink and one for the file sink. Templates
//! have two substitution sites, `{message}` and `{timestamp}`; `{{` and `}}`
//! produce literal braces.

use super::error::{LoggerError, Result};
use super::log_level::{Level, LogLevel};
use super::timestamp::TimestampFormat;
use std::collections::HashMap;
use std::fmt;

/// Output destination a line is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Console,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Message,
    Timestamp,
}

/// A parsed message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown placeholders or unbalanced braces.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(LoggerError::config(
                            "Template",
                            format!("unclosed placeholder in '{}'", source),
                        ));
                    }
                    let segment = match name.as_str() {
                        "message" => Segment::Message,
                        "timestamp" => Segment::Timestamp,
                        other => {
                            return Err(LoggerError::config(
                                "Template",
                                format!("unknown placeholder '{{{}}}' in '{}'", other, source),
                            ))
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => {
                    return Err(LoggerError::config(
                        "Template",
                        format!("unmatched '}}' in '{}'", source),
                    ))
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn uses_timestamp(&self) -> bool {
        self.segments.contains(&Segment::Timestamp)
    }

    fn render(&self, message: &str, timestamp: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + message.len() + timestamp.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Message => out.push_str(message),
                Segment::Timestamp => out.push_str(timestamp),
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Console and file templates for one level
#[derive(Debug, Clone)]
pub struct StyleEntry<L: Level> {
    pub level: L,
    pub console: Template,
    pub file: Template,
}

impl<L: Level> StyleEntry<L> {
    /// # Errors
    ///
    /// Returns a configuration error if either template fails to parse.
    pub fn new(level: L, console: &str, file: &str) -> Result<Self> {
        Ok(Self {
            level,
            console: Template::parse(console)?,
            file: Template::parse(file)?,
        })
    }

    /// Entry in the default layout: `<label>: <message>` on the console and
    /// `[<timestamp>]:<label>: <message>` in the file
    pub fn labelled(level: L) -> Self {
        let label = level.label();
        let console = Template {
            source: format!("{}: {{message}}", escape(label)),
            segments: vec![Segment::Literal(format!("{}: ", label)), Segment::Message],
        };
        let file = Template {
            source: format!("[{{timestamp}}]:{}: {{message}}", escape(label)),
            segments: vec![
                Segment::Literal("[".to_string()),
                Segment::Timestamp,
                Segment::Literal(format!("]:{}: ", label)),
                Segment::Message,
            ],
        };
        Self {
            level,
            console,
            file,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Escapes line breaks so one log call always produces one line.
/// Backslashes are doubled first, so distinct messages stay distinct.
fn sanitize_message(message: &str) -> String {
    message
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Immutable level-to-style mapping covering every member of `L`
#[derive(Debug, Clone)]
pub struct StyleTable<L: Level> {
    entries: HashMap<L, StyleEntry<L>>,
    timestamp_format: TimestampFormat,
}

impl<L: Level> StyleTable<L> {
    /// Build a table from explicit entries
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a level appears twice or a member of
    /// `L::all()` has no entry.
    pub fn new(entries: impl IntoIterator<Item = StyleEntry<L>>) -> Result<Self> {
        let mut map = HashMap::new();
        for entry in entries {
            let level = entry.level;
            if map.insert(level, entry).is_some() {
                return Err(LoggerError::config(
                    "StyleTable",
                    format!("duplicate entry for level {:?}", level),
                ));
            }
        }

        let missing: Vec<String> = L::all()
            .iter()
            .filter(|level| !map.contains_key(*level))
            .map(|level| format!("{:?}", level))
            .collect();
        if !missing.is_empty() {
            return Err(LoggerError::config(
                "StyleTable",
                format!("missing entries for levels: {}", missing.join(", ")),
            ));
        }

        Ok(Self {
            entries: map,
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Table using the default labelled layout for every level
    pub fn labelled() -> Self {
        Self {
            entries: L::all()
                .iter()
                .map(|level| (*level, StyleEntry::labelled(*level)))
                .collect(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn entry(&self, level: L) -> Option<&StyleEntry<L>> {
        self.entries.get(&level)
    }

    /// Render `message` for `sink` using the style of `level`.
    ///
    /// The timestamp is taken at call time.
    pub fn render(&self, message: &str, level: L, sink: Sink) -> String {
        let message = sanitize_message(message);
        let Some(entry) = self.entries.get(&level) else {
            // `L::all()` did not list this level; emit the bare message
            return message;
        };
        let template = match sink {
            Sink::Console => &entry.console,
            Sink::File => &entry.file,
        };
        if template.uses_timestamp() {
            template.render(&message, &self.timestamp_format.now())
        } else {
            template.render(&message, "")
        }
    }
}

impl Default for StyleTable<LogLevel> {
    fn default() -> Self {
        Self::labelled()
    }
}
