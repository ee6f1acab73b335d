//! Core logger types and traits

pub mod attribute;
pub mod builder;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod log_context;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod provider;
pub mod record;
pub mod structured_builder;
pub mod timestamp;

pub use attribute::{Attr, Source, Value, ValueKind, LEVEL_KEY, MESSAGE_KEY, SOURCE_KEY, TIME_KEY};
pub use builder::LoggerBuilder;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, FormatterChain, Matcher, SourceRoot, Transform};
pub use handler::{Handler, HandlerOptions, ReplaceAttr};
pub use log_context::LogContext;
pub use log_level::LogLevel;
pub use logger::{default_logger, set_default, Logger};
pub use metrics::LoggerMetrics;
pub use provider::{FromContext, StaticValue, ValueProvider};
pub use record::Record;
pub use structured_builder::StructuredLogBuilder;
pub use timestamp::TimeLayout;
