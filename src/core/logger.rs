//! Main logger implementation

use super::{
    attribute::Attr, handler::Handler, handler::HandlerOptions, log_context::LogContext,
    log_level::LogLevel, metrics::LoggerMetrics, record::Record,
};
use crate::handlers::{JsonHandler, SharedWriter};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Front end over a handler chain
///
/// Cloning is cheap and clones share the handler and metrics. A logger is
/// immutable once built and can be used from any number of threads.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.handler.enabled(level)
    }

    /// Logger that adds `attrs` to every record
    #[must_use]
    pub fn with(&self, attrs: Vec<Attr>) -> Self {
        Self {
            handler: self.handler.with_attrs(attrs),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Logger that nests subsequent attributes under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            metrics: Arc::clone(&self.metrics),
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_attrs(&LogContext::background(), level, message, Vec::new());
    }

    #[track_caller]
    pub fn log_ctx(&self, ctx: &LogContext, level: LogLevel, message: impl Into<String>) {
        self.log_attrs(ctx, level, message, Vec::new());
    }

    /// Log with call-site attributes and an ambient context
    ///
    /// Records below the handler's level are dropped before any formatting
    /// or enrichment happens.
    #[track_caller]
    pub fn log_attrs(
        &self,
        ctx: &LogContext,
        level: LogLevel,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if !self.handler.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let mut record = Record::new(level, message);
        record.add_attrs(attrs);
        self.dispatch(ctx, record);
    }

    /// Hand a prebuilt record to the handler chain
    pub fn log_record(&self, ctx: &LogContext, record: Record) {
        if !self.handler.enabled(record.level) {
            self.metrics.record_filtered();
            return;
        }
        self.dispatch(ctx, record);
    }

    fn dispatch(&self, ctx: &LogContext, record: Record) {
        match self.handler.handle(ctx, record) {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(e) => {
                // The pipeline itself failed; report outside of it
                eprintln!("[LOGGER ERROR] Handler failed: {}", e);
                self.metrics.record_dropped();
            }
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug_ctx(&self, ctx: &LogContext, message: impl Into<String>) {
        self.log_ctx(ctx, LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info_ctx(&self, ctx: &LogContext, message: impl Into<String>) {
        self.log_ctx(ctx, LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn_ctx(&self, ctx: &LogContext, message: impl Into<String>) {
        self.log_ctx(ctx, LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error_ctx(&self, ctx: &LogContext, message: impl Into<String>) {
        self.log_ctx(ctx, LogLevel::Error, message);
    }

    /// Get the logger metrics for observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_structured_logger::LoggerBuilder;
    ///
    /// let logger = LoggerBuilder::new().set_writer(std::io::sink()).build().unwrap();
    /// logger.debug("below the default INFO threshold");
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.filtered_count(), 1);
    /// assert_eq!(metrics.total_logged(), 0);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Get the number of records lost to handler failures
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

static DEFAULT_LOGGER: RwLock<Option<Logger>> = parking_lot::const_rwlock(None);

static FALLBACK_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install `logger` as the process-wide default
///
/// Intended for one-time use at startup. There is no ordering between
/// concurrent installers: the last write wins.
pub fn set_default(logger: Logger) {
    *DEFAULT_LOGGER.write() = Some(logger);
}

/// The process-wide default logger
///
/// Until [`set_default`] is called this is a JSON logger writing INFO and
/// above to standard output.
pub fn default_logger() -> Logger {
    if let Some(logger) = DEFAULT_LOGGER.read().as_ref() {
        return logger.clone();
    }
    FALLBACK_LOGGER
        .get_or_init(|| {
            Logger::new(Arc::new(JsonHandler::new(
                SharedWriter::stdout(),
                HandlerOptions::default(),
            )))
        })
        .clone()
}
