//! Structured log builder for fluent record construction
//!
//! Provides a builder pattern for creating records with call-site attributes
//! and an optional ambient context.

use super::attribute::{Attr, Value};
use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::record::Record;
use std::panic::Location;

/// Builder for structured log records
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let logger = LoggerBuilder::new().set_writer(std::io::sink()).build().unwrap();
/// let ctx = LogContext::background().with_value("request_id", "abc-123".to_string());
///
/// logger.info_builder()
///     .message("Request processed")
///     .attr("user_id", 12345)
///     .attr("latency_ms", 42.5)
///     .context(&ctx)
///     .log();
/// ```
pub struct StructuredLogBuilder<'a> {
    logger: &'a Logger,
    level: LogLevel,
    message: String,
    attrs: Vec<Attr>,
    ctx: Option<&'a LogContext>,
    caller: &'static Location<'static>,
}

impl<'a> StructuredLogBuilder<'a> {
    /// Create a new structured log builder
    #[track_caller]
    pub fn new(logger: &'a Logger, level: LogLevel) -> Self {
        Self {
            logger,
            level,
            message: String::new(),
            attrs: Vec::new(),
            ctx: None,
            caller: Location::caller(),
        }
    }

    #[must_use]
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = msg.into();
        self
    }

    /// Add a call-site attribute
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push(Attr::new(key, value));
        self
    }

    #[must_use]
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Ambient context handed to providers
    #[must_use]
    pub fn context(mut self, ctx: &'a LogContext) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Build and send the record
    ///
    /// The source location is the line that created the builder.
    pub fn log(self) {
        if !self.logger.enabled(self.level) {
            self.logger.metrics().record_filtered();
            return;
        }

        let mut record = Record::at(self.level, self.message, self.caller);
        record.add_attrs(self.attrs);
        match self.ctx {
            Some(ctx) => self.logger.log_record(ctx, record),
            None => self.logger.log_record(&LogContext::background(), record),
        }
    }
}

impl Logger {
    #[track_caller]
    pub fn debug_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Debug)
    }

    /// Create an info-level structured log builder
    ///
    /// # Example
    ///
    /// ```
    /// use rust_structured_logger::LoggerBuilder;
    ///
    /// let logger = LoggerBuilder::new().set_writer(std::io::sink()).build().unwrap();
    /// logger.info_builder()
    ///     .message("Request processed")
    ///     .attr("status", 200)
    ///     .log();
    /// ```
    #[track_caller]
    pub fn info_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Info)
    }

    #[track_caller]
    pub fn warn_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Warn)
    }

    #[track_caller]
    pub fn error_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Error)
    }
}
