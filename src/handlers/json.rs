//! JSON handler for structured logging
//!
//! Writes each record as a single-line JSON object (JSONL format)
//! compatible with log aggregation tools like ELK, Loki, etc.

use super::writer::SharedWriter;
use crate::core::{
    Attr, Handler, HandlerOptions, LogContext, LogLevel, Record, Result, Value, LEVEL_KEY,
    MESSAGE_KEY, SOURCE_KEY, TIME_KEY,
};
use std::sync::Arc;

/// Attributes bound to an open group
#[derive(Debug, Clone)]
struct GroupFrame {
    name: String,
    attrs: Vec<Attr>,
}

/// JSON-lines sink
///
/// Output field order is `time`, `level`, `source` (when enabled), `msg`,
/// handler-bound attributes, then the record's attributes. Duplicate keys are
/// written as they come; nothing already in the record is overwritten.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::{HandlerOptions, LogLevel};
/// use rust_structured_logger::handlers::{JsonHandler, SharedWriter};
///
/// let handler = JsonHandler::new(
///     SharedWriter::stdout(),
///     HandlerOptions::new().with_level(LogLevel::Debug),
/// );
/// ```
#[derive(Clone)]
pub struct JsonHandler {
    writer: SharedWriter,
    options: Arc<HandlerOptions>,
    attrs: Vec<Attr>,
    groups: Vec<GroupFrame>,
}

impl JsonHandler {
    pub fn new(writer: SharedWriter, options: HandlerOptions) -> Self {
        Self {
            writer,
            options: Arc::new(options),
            attrs: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// Encode `record` as one JSON line, including the trailing newline
    pub fn encode(&self, record: Record) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(256);
        let mut first = true;
        buf.push(b'{');

        let mut builtins = vec![
            Attr::new(TIME_KEY, Value::Time(record.time)),
            Attr::new(LEVEL_KEY, record.level.to_str()),
        ];
        if self.options.add_source {
            builtins.push(Attr::new(SOURCE_KEY, record.source()));
        }
        builtins.push(Attr::new(MESSAGE_KEY, record.message.clone()));

        let mut groups = Vec::new();
        for attr in builtins {
            self.write_attr(&mut buf, &mut first, &mut groups, attr)?;
        }
        for attr in &self.attrs {
            self.write_attr(&mut buf, &mut first, &mut groups, attr.clone())?;
        }

        let record_attrs = record.into_attrs();
        let mut opened = 0;
        for (i, frame) in self.groups.iter().enumerate() {
            let has_content = !record_attrs.is_empty()
                || self.groups[i..].iter().any(|g| !g.attrs.is_empty());
            if !has_content {
                break;
            }
            write_key(&mut buf, &mut first, &frame.name)?;
            buf.push(b'{');
            first = true;
            opened += 1;
            groups.push(frame.name.clone());
            for attr in &frame.attrs {
                self.write_attr(&mut buf, &mut first, &mut groups, attr.clone())?;
            }
        }
        if opened == self.groups.len() {
            for attr in record_attrs {
                self.write_attr(&mut buf, &mut first, &mut groups, attr)?;
            }
        }
        for _ in 0..opened {
            buf.push(b'}');
        }

        buf.extend_from_slice(b"}\n");
        Ok(buf)
    }

    fn replace(&self, groups: &[String], attr: Attr) -> Attr {
        match &self.options.replace_attr {
            Some(replace) => replace(groups, attr),
            None => attr,
        }
    }

    fn write_attr(
        &self,
        buf: &mut Vec<u8>,
        first: &mut bool,
        groups: &mut Vec<String>,
        attr: Attr,
    ) -> Result<()> {
        let Attr { key, value } = attr;
        if let Value::Group(members) = value {
            if members.is_empty() {
                return Ok(());
            }
            // Groups with an empty key are inlined into the enclosing object
            if key.is_empty() {
                for member in members {
                    self.write_attr(buf, first, groups, member)?;
                }
                return Ok(());
            }
            write_key(buf, first, &key)?;
            buf.push(b'{');
            let mut inner_first = true;
            groups.push(key);
            for member in members {
                self.write_attr(buf, &mut inner_first, groups, member)?;
            }
            groups.pop();
            buf.push(b'}');
            return Ok(());
        }

        let attr = self.replace(groups, Attr { key, value });
        if attr.key.is_empty() {
            return Ok(());
        }
        write_key(buf, first, &attr.key)?;
        serde_json::to_writer(&mut *buf, &attr.value.to_json_value())?;
        Ok(())
    }
}

fn write_key(buf: &mut Vec<u8>, first: &mut bool, key: &str) -> Result<()> {
    if !*first {
        buf.push(b',');
    }
    *first = false;
    serde_json::to_writer(&mut *buf, key)?;
    buf.push(b':');
    Ok(())
}

impl Handler for JsonHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.options.level
    }

    fn handle(&self, _ctx: &LogContext, record: Record) -> Result<()> {
        let line = self.encode(record)?;
        self.writer.write_record(&line)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut handler = self.clone();
        match handler.groups.last_mut() {
            Some(frame) => frame.attrs.extend(attrs),
            None => handler.attrs.extend(attrs),
        }
        Arc::new(handler)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut handler = self.clone();
        if !name.is_empty() {
            handler.groups.push(GroupFrame {
                name: name.to_string(),
                attrs: Vec::new(),
            });
        }
        Arc::new(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use std::io::{self, Write};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().clone())
                .expect("utf8 output")
                .lines()
                .map(String::from)
                .collect()
        }
    }

    fn json_handler(options: HandlerOptions) -> (JsonHandler, Buffer) {
        let buffer = Buffer::default();
        (JsonHandler::new(SharedWriter::new(buffer.clone()), options), buffer)
    }

    fn record(message: &str) -> Record {
        let time = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            .fixed_offset();
        Record::new(LogLevel::Info, message).with_time(time)
    }

    #[test]
    fn test_field_order() {
        let (handler, _) = json_handler(HandlerOptions::new());
        let mut rec = record("hello");
        rec.add_attr(Attr::new("user_id", 123));

        let line = String::from_utf8(handler.encode(rec).unwrap()).unwrap();
        assert_eq!(
            line,
            "{\"time\":\"2025-01-08T10:30:45.000Z\",\"level\":\"INFO\",\"msg\":\"hello\",\"user_id\":123}\n"
        );
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let (handler, _) = json_handler(HandlerOptions::new());
        let mut rec = record("dup");
        rec.add_attr(Attr::new("k", 1));
        rec.add_attr(Attr::new("k", 2));

        let line = String::from_utf8(handler.encode(rec).unwrap()).unwrap();
        assert!(line.contains("\"k\":1,\"k\":2"));
    }

    #[test]
    fn test_add_source() {
        let (handler, buffer) = json_handler(HandlerOptions::new().with_add_source(true));
        handler.handle(&LogContext::background(), record("src")).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert!(parsed["source"]["file"].as_str().unwrap().ends_with("json.rs"));
        assert!(parsed["source"]["line"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_replace_attr_sees_builtins_and_groups() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let options = HandlerOptions::new().with_replace_attr(move |groups, attr| {
            seen_clone.lock().push((groups.join("."), attr.key.clone()));
            attr
        });
        let (handler, _) = json_handler(options);

        let mut rec = record("m");
        rec.add_attr(Attr::group("req", vec![Attr::new("id", 1)]));
        handler.encode(rec).unwrap();

        let seen = seen.lock();
        assert!(seen.contains(&(String::new(), "time".to_string())));
        assert!(seen.contains(&(String::new(), "level".to_string())));
        assert!(seen.contains(&(String::new(), "msg".to_string())));
        assert!(seen.contains(&("req".to_string(), "id".to_string())));
        assert!(!seen.iter().any(|(_, key)| key == "req"));
    }

    #[test]
    fn test_replace_attr_emptied_key_is_dropped() {
        let options = HandlerOptions::new().with_replace_attr(|_, mut attr| {
            if attr.key == "secret" {
                attr.key.clear();
            }
            attr
        });
        let (handler, _) = json_handler(options);

        let mut rec = record("m");
        rec.add_attr(Attr::new("secret", "hunter2"));
        let line = String::from_utf8(handler.encode(rec).unwrap()).unwrap();
        assert!(!line.contains("hunter2"));
    }

    #[test]
    fn test_with_attrs_and_group() {
        let (handler, buffer) = json_handler(HandlerOptions::new());
        let derived = handler
            .with_attrs(vec![Attr::new("service", "api")])
            .with_group("request")
            .with_attrs(vec![Attr::new("method", "GET")]);

        let mut rec = record("grouped");
        rec.add_attr(Attr::new("status", 200));
        derived.handle(&LogContext::background(), rec).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(parsed["service"], "api");
        assert_eq!(parsed["request"]["method"], "GET");
        assert_eq!(parsed["request"]["status"], 200);
    }

    #[test]
    fn test_empty_group_is_omitted() {
        let (handler, buffer) = json_handler(HandlerOptions::new());
        let derived = handler.with_group("request");
        derived.handle(&LogContext::background(), record("bare")).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert!(parsed.get("request").is_none());
    }

    #[test]
    fn test_enabled_respects_level() {
        let (handler, _) = json_handler(HandlerOptions::new().with_level(LogLevel::Warn));
        assert!(!handler.enabled(LogLevel::Debug));
        assert!(!handler.enabled(LogLevel::Info));
        assert!(handler.enabled(LogLevel::Warn));
        assert!(handler.enabled(LogLevel::Error));
    }
}
