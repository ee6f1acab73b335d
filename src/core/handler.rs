//! Handler trait for record sinks

use super::{
    attribute::Attr, error::Result, log_context::LogContext, log_level::LogLevel, record::Record,
};
use std::fmt;
use std::sync::Arc;

/// Hook rewriting each attribute before it is encoded
///
/// Receives the names of the groups enclosing the attribute (empty for
/// built-in attributes and top-level ones).
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Attr + Send + Sync>;

/// A sink for log records; implementations must be safe to call concurrently
pub trait Handler: Send + Sync {
    /// Whether records at `level` would be handled at all
    fn enabled(&self, level: LogLevel) -> bool;

    fn handle(&self, ctx: &LogContext, record: Record) -> Result<()>;

    /// Handler that also emits `attrs` on every record
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// Handler that nests subsequent attributes under `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

/// Options understood by the built-in sinks
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Records below this level are dropped
    pub level: LogLevel,
    /// Attach the call-site location as the `source` attribute
    pub add_source: bool,
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    #[must_use]
    pub fn with_replace_attr<F>(mut self, replace: F) -> Self
    where
        F: Fn(&[String], Attr) -> Attr + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(replace));
        self
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("replace_attr", &self.replace_attr.is_some())
            .finish()
    }
}
