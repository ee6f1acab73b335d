//! Decorating handler that enriches records from value providers

use crate::core::{Attr, Handler, LogContext, LogLevel, Record, Result, ValueProvider};
use std::sync::Arc;

/// Wraps a handler and appends provider attributes to every record
///
/// Providers are queried in order; each present result is appended after
/// the call-site attributes. Absent providers are skipped silently and the
/// record is always delegated to the wrapped handler.
#[derive(Clone)]
pub struct ContextHandler {
    inner: Arc<dyn Handler>,
    providers: Arc<[Arc<dyn ValueProvider>]>,
}

impl ContextHandler {
    pub fn new(inner: Arc<dyn Handler>, providers: Vec<Arc<dyn ValueProvider>>) -> Self {
        Self {
            inner,
            providers: providers.into(),
        }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    fn wrap(&self, inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Self {
            inner,
            providers: Arc::clone(&self.providers),
        })
    }
}

impl Handler for ContextHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        self.inner.enabled(level)
    }

    fn handle(&self, ctx: &LogContext, mut record: Record) -> Result<()> {
        record.add_attrs(self.providers.iter().filter_map(|p| p.get(ctx)));
        self.inner.handle(ctx, record)
    }

    // Derived handlers keep enriching
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        self.wrap(self.inner.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.wrap(self.inner.with_group(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::{from_context, static_value};
    use parking_lot::Mutex;

    /// Captures handled records instead of encoding them
    #[derive(Clone, Default)]
    struct Capture {
        records: Arc<Mutex<Vec<Vec<Attr>>>>,
        bound: Vec<Attr>,
    }

    impl Handler for Capture {
        fn enabled(&self, level: LogLevel) -> bool {
            level >= LogLevel::Info
        }

        fn handle(&self, _ctx: &LogContext, record: Record) -> Result<()> {
            let mut attrs = self.bound.clone();
            attrs.extend(record.into_attrs());
            self.records.lock().push(attrs);
            Ok(())
        }

        fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
            let mut derived = self.clone();
            derived.bound.extend(attrs);
            Arc::new(derived)
        }

        fn with_group(&self, _name: &str) -> Arc<dyn Handler> {
            Arc::new(self.clone())
        }
    }

    fn keys(attrs: &[Attr]) -> Vec<&str> {
        attrs.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn test_appends_in_provider_order() {
        let capture = Capture::default();
        let handler = ContextHandler::new(
            Arc::new(capture.clone()),
            vec![
                static_value("company", "cid"),
                from_context::<String>("uuid"),
                static_value("version", 1.0),
            ],
        );

        let ctx = LogContext::background().with_value("uuid", "1A2B".to_string());
        let mut record = Record::new(LogLevel::Info, "enriched");
        record.add_attr(Attr::new("call_site", true));
        handler.handle(&ctx, record).unwrap();

        let records = capture.records.lock();
        assert_eq!(keys(&records[0]), ["call_site", "company", "uuid", "version"]);
    }

    #[test]
    fn test_absent_provider_is_skipped() {
        let capture = Capture::default();
        let handler = ContextHandler::new(
            Arc::new(capture.clone()),
            vec![from_context::<String>("uuid"), static_value("company", "cid")],
        );

        handler
            .handle(&LogContext::background(), Record::new(LogLevel::Info, "plain"))
            .unwrap();

        let records = capture.records.lock();
        assert_eq!(records[0], vec![Attr::new("company", "cid")]);
    }

    #[test]
    fn test_existing_attrs_are_not_overwritten() {
        let capture = Capture::default();
        let handler =
            ContextHandler::new(Arc::new(capture.clone()), vec![static_value("user", "static")]);

        let mut record = Record::new(LogLevel::Info, "dup");
        record.add_attr(Attr::new("user", "caller"));
        handler.handle(&LogContext::background(), record).unwrap();

        let records = capture.records.lock();
        assert_eq!(
            records[0],
            vec![Attr::new("user", "caller"), Attr::new("user", "static")]
        );
    }

    #[test]
    fn test_derived_handlers_keep_providers() {
        let capture = Capture::default();
        let handler =
            ContextHandler::new(Arc::new(capture.clone()), vec![static_value("company", "cid")]);

        let derived = handler
            .with_attrs(vec![Attr::new("service", "api")])
            .with_group("request");
        derived
            .handle(&LogContext::background(), Record::new(LogLevel::Info, "derived"))
            .unwrap();

        let records = capture.records.lock();
        assert_eq!(keys(&records[0]), ["service", "company"]);
    }

    #[test]
    fn test_enabled_delegates() {
        let handler = ContextHandler::new(Arc::new(Capture::default()), vec![]);
        assert!(!handler.enabled(LogLevel::Debug));
        assert!(handler.enabled(LogLevel::Error));
        assert_eq!(handler.provider_count(), 0);
    }
}
