//! Log record structure

use super::attribute::{Attr, Source};
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset, Local};
use std::panic::Location;

/// One log call: built-in fields plus call-site attributes
///
/// Handlers receive records by value; a decorating handler may append
/// attributes before passing the record on.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<FixedOffset>,
    pub level: LogLevel,
    pub message: String,
    attrs: Vec<Attr>,
    caller: &'static Location<'static>,
}

impl Record {
    /// Create a record stamped with the current local time and the caller's location
    #[track_caller]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(level, message, Location::caller())
    }

    /// Create a record attributed to an explicit call site
    pub fn at(
        level: LogLevel,
        message: impl Into<String>,
        caller: &'static Location<'static>,
    ) -> Self {
        Self {
            time: Local::now().fixed_offset(),
            level,
            message: message.into(),
            attrs: Vec::new(),
            caller,
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.time = time;
        self
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn into_attrs(self) -> Vec<Attr> {
        self.attrs
    }

    /// Call-site location of the log statement
    pub fn source(&self) -> Source {
        Source::new("", self.caller.file(), self.caller.line())
    }
}
