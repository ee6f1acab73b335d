//! Ambient per-call context consulted by value providers
//!
//! `LogContext` is an immutable bag of request-scoped values. Deriving a new
//! context with [`LogContext::with_value`] never touches the parent, so one
//! context can be shared freely between threads and log calls.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ContextValue = Arc<dyn Any + Send + Sync>;

/// Opaque per-call carrier of request/call-scoped values
///
/// # Example
///
/// ```
/// use rust_structured_logger::LogContext;
///
/// let ctx = LogContext::background().with_value("uuid", "1A2B".to_string());
///
/// assert_eq!(ctx.value::<String>("uuid").map(String::as_str), Some("1A2B"));
/// // Lookups are typed: a value of another type is treated as absent
/// assert!(ctx.value::<&str>("uuid").is_none());
/// ```
#[derive(Clone, Default)]
pub struct LogContext {
    values: Arc<HashMap<String, ContextValue>>,
}

impl LogContext {
    /// Create an empty context
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context holding `value` under `key`
    ///
    /// A value already stored under `key` is shadowed in the derived
    /// context only.
    #[must_use]
    pub fn with_value<K, T>(&self, key: K, value: T) -> Self
    where
        K: Into<String>,
        T: Any + Send + Sync,
    {
        let mut values = HashMap::clone(&self.values);
        values.insert(key.into(), Arc::new(value));
        Self {
            values: Arc::new(values),
        }
    }

    /// Look up `key`, returning the value only if its type is exactly `T`
    pub fn value<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Check whether any value is stored under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Check if context has any values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("LogContext").field("keys", &keys).finish()
    }
}
