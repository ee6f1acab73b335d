//! # Rust Structured Logger
//!
//! A configurable structured logger that writes one JSON object per record.
//!
//! ## Features
//!
//! - **Formatter Chain**: Rename keys, reformat timestamps and shorten source
//!   paths before encoding
//! - **Context Providers**: Enrich every record with constant values or
//!   values carried in an explicit [`LogContext`]
//! - **Config Driven**: Build a logger from a small JSON document
//! - **Thread Safe**: Loggers are immutable once built and cheap to clone
//!
//! ## Example
//!
//! ```
//! use rust_structured_logger::prelude::*;
//!
//! let logger = LoggerBuilder::from_json(r#"{"level": "DEBUG", "TimeFormat": "RFC3339", "UTC": true}"#)
//!     .unwrap()
//!     .add_provider(provider::from_context::<String>("request_id"))
//!     .set_writer(std::io::sink())
//!     .build()
//!     .unwrap();
//!
//! let ctx = LogContext::background().with_value("request_id", "abc-123".to_string());
//! logger.info_ctx(&ctx, "request handled");
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::provider;
    pub use crate::core::{
        default_logger, set_default, Attr, Formatter, FormatterChain, FromContext, Handler,
        HandlerOptions, LogContext, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Matcher, Record, Result, SourceRoot, StaticValue, StructuredLogBuilder,
        TimeLayout, Transform, Value, ValueKind, ValueProvider,
    };
    pub use crate::handlers::{ContextHandler, JsonHandler, SharedWriter};
}

pub use crate::core::{
    default_logger, set_default, Attr, Formatter, FormatterChain, FromContext, Handler,
    HandlerOptions, LogContext, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Matcher, Record, ReplaceAttr, Result, Source, SourceRoot, StaticValue,
    StructuredLogBuilder, TimeLayout, Transform, Value, ValueKind, ValueProvider, LEVEL_KEY,
    MESSAGE_KEY, SOURCE_KEY, TIME_KEY,
};
pub use handlers::{ContextHandler, JsonHandler, SharedWriter};
