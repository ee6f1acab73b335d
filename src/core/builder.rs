//! Builder assembling formatters, providers and sink options into a logger

use super::{
    attribute::Attr,
    error::Result,
    formatter::{Formatter, FormatterChain},
    handler::{Handler, HandlerOptions},
    log_level::LogLevel,
    logger::{self, Logger},
    provider::ValueProvider,
};
use crate::handlers::{ContextHandler, JsonHandler, SharedWriter};
use std::io::Write;
use std::sync::Arc;

/// Mutable accumulator for logger construction
///
/// Setters take `&mut self` and chain. [`build`](Self::build) borrows the
/// builder, so it can be called again to get an independent logger from the
/// same state. Meant for single-threaded use at startup.
///
/// # Example
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let logger = LoggerBuilder::new()
///     .set_level(LogLevel::Debug)
///     .add_formatter(Formatter::rewrite_key("source", "logger"))
///     .add_provider(provider::static_value("service", "api"))
///     .set_writer(std::io::sink())
///     .build()
///     .unwrap();
///
/// logger.debug("ready");
/// ```
#[derive(Clone)]
pub struct LoggerBuilder {
    formatters: Vec<Formatter>,
    providers: Vec<Arc<dyn ValueProvider>>,
    level: LogLevel,
    add_source: bool,
    set_default: bool,
    writer: SharedWriter,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    ///
    /// INFO level, no source attribute, standard output, not installed as
    /// the process default.
    pub fn new() -> Self {
        Self {
            formatters: Vec::new(),
            providers: Vec::new(),
            level: LogLevel::Info,
            add_source: false,
            set_default: false,
            writer: SharedWriter::stdout(),
        }
    }

    /// Set minimum log level
    pub fn set_level(&mut self, level: LogLevel) -> &mut Self {
        self.level = level;
        self
    }

    /// Install the built logger as the process-wide default
    pub fn set_default(&mut self, set_default: bool) -> &mut Self {
        self.set_default = set_default;
        self
    }

    /// Attach the call-site location as the `source` attribute
    pub fn set_add_source(&mut self, add_source: bool) -> &mut Self {
        self.add_source = add_source;
        self
    }

    /// Append a formatter to the end of the chain
    pub fn add_formatter(&mut self, formatter: Formatter) -> &mut Self {
        self.formatters.push(formatter);
        self
    }

    pub fn add_formatters(&mut self, formatters: impl IntoIterator<Item = Formatter>) -> &mut Self {
        self.formatters.extend(formatters);
        self
    }

    /// Append a provider; providers contribute in the order they were added
    pub fn add_provider(&mut self, provider: Arc<dyn ValueProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    pub fn add_providers(
        &mut self,
        providers: impl IntoIterator<Item = Arc<dyn ValueProvider>>,
    ) -> &mut Self {
        self.providers.extend(providers);
        self
    }

    /// Write records to `writer` instead of standard output
    pub fn set_writer<W: Write + Send + 'static>(&mut self, writer: W) -> &mut Self {
        self.writer = SharedWriter::new(writer);
        self
    }

    /// Share an existing writer handle with other loggers
    pub fn set_shared_writer(&mut self, writer: SharedWriter) -> &mut Self {
        self.writer = writer;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn add_source(&self) -> bool {
        self.add_source
    }

    pub fn is_default(&self) -> bool {
        self.set_default
    }

    pub fn formatters(&self) -> &[Formatter] {
        &self.formatters
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Sink options for the current state
    ///
    /// The replace hook is only installed when the formatter chain is
    /// non-empty; it runs every attribute through the whole chain.
    pub fn handler_options(&self) -> HandlerOptions {
        let options = HandlerOptions::new()
            .with_level(self.level)
            .with_add_source(self.add_source);

        if self.formatters.is_empty() {
            return options;
        }
        let chain = FormatterChain::new(self.formatters.clone());
        options.with_replace_attr(move |_groups: &[String], mut attr: Attr| {
            chain.apply(&mut attr);
            attr
        })
    }

    /// Build the Logger
    ///
    /// Wraps the JSON sink in a [`ContextHandler`] when providers are
    /// registered, and installs the result as the process default if
    /// requested. No current configuration makes this fail.
    pub fn build(&self) -> Result<Logger> {
        let mut handler: Arc<dyn Handler> =
            Arc::new(JsonHandler::new(self.writer.clone(), self.handler_options()));
        if !self.providers.is_empty() {
            handler = Arc::new(ContextHandler::new(handler, self.providers.clone()));
        }

        let logger = Logger::new(handler);
        if self.set_default {
            logger::set_default(logger.clone());
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
