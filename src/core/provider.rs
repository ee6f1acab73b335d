//! Value providers that enrich every record with extra attributes

use super::attribute::{Attr, Value};
use super::log_context::LogContext;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A rule that conditionally contributes one attribute to a record
///
/// `get` must not block and must not fail: missing or mismatched data is
/// reported as `None`.
pub trait ValueProvider: Send + Sync {
    fn get(&self, ctx: &LogContext) -> Option<Attr>;
}

impl<P: ValueProvider + ?Sized> ValueProvider for Arc<P> {
    fn get(&self, ctx: &LogContext) -> Option<Attr> {
        (**self).get(ctx)
    }
}

impl<P: ValueProvider + ?Sized> ValueProvider for Box<P> {
    fn get(&self, ctx: &LogContext) -> Option<Attr> {
        (**self).get(ctx)
    }
}

/// Reads a value of exactly type `T` from the ambient context
pub struct FromContext<T> {
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromContext<T> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T> ValueProvider for FromContext<T>
where
    T: Any + Clone + Into<Value>,
{
    fn get(&self, ctx: &LogContext) -> Option<Attr> {
        ctx.value::<T>(&self.key)
            .map(|value| Attr::new(self.key.clone(), value.clone()))
    }
}

impl<T> fmt::Debug for FromContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromContext")
            .field("key", &self.key)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Adds the same attribute to every record
#[derive(Debug, Clone)]
pub struct StaticValue {
    attr: Attr,
}

impl StaticValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attr: Attr::new(key, value),
        }
    }
}

impl ValueProvider for StaticValue {
    fn get(&self, _ctx: &LogContext) -> Option<Attr> {
        Some(self.attr.clone())
    }
}

/// Provider reading `key` from the context when it holds a `T`
pub fn from_context<T>(key: impl Into<String>) -> Arc<dyn ValueProvider>
where
    T: Any + Clone + Into<Value>,
{
    Arc::new(FromContext::<T>::new(key))
}

/// Provider always contributing `key = value`
pub fn static_value(key: impl Into<String>, value: impl Into<Value>) -> Arc<dyn ValueProvider> {
    Arc::new(StaticValue::new(key, value))
}
