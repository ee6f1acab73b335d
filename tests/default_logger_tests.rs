//! Process-wide default logger registration
//!
//! Kept in its own test binary since it mutates global state.

use parking_lot::Mutex;
use rust_structured_logger::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;

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
    fn messages(&self) -> Vec<String> {
        let out = String::from_utf8(self.0.lock().clone()).unwrap();
        out.lines()
            .map(|line| {
                let record: serde_json::Value = serde_json::from_str(line).unwrap();
                record["msg"].as_str().unwrap().to_string()
            })
            .collect()
    }
}

#[test]
fn test_default_registration_last_write_wins() {
    // Fallback before anything is installed: INFO and above
    let fallback = default_logger();
    assert!(fallback.enabled(LogLevel::Info));
    assert!(!fallback.enabled(LogLevel::Debug));

    let first = Buffer::default();
    LoggerBuilder::from_json(r#"{"level": "DEBUG", "IsDefault": true}"#)
        .unwrap()
        .set_writer(first.clone())
        .build()
        .unwrap();

    default_logger().debug("to first");
    assert_eq!(first.messages(), ["to first"]);

    let second = Buffer::default();
    let mut builder = LoggerBuilder::new();
    builder.set_writer(second.clone());
    set_default(builder.build().unwrap());

    default_logger().info("to second");
    default_logger().debug("filtered by second");
    assert_eq!(first.messages(), ["to first"]);
    assert_eq!(second.messages(), ["to second"]);

    // A builder without the flag leaves the default alone
    let third = Buffer::default();
    LoggerBuilder::new()
        .set_writer(third.clone())
        .build()
        .unwrap();
    default_logger().info("still second");
    assert_eq!(second.messages(), ["to second", "still second"]);
    assert!(third.messages().is_empty());
}
