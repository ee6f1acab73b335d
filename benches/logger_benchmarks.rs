//! Criterion benchmarks for rust_structured_logger

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_structured_logger::prelude::*;

// ============================================================================
// Formatter Chain Benchmarks
// ============================================================================

fn bench_formatter_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatter_chain");
    group.throughput(Throughput::Elements(1));

    let chain = FormatterChain::new(vec![
        Formatter::rewrite_key("source", "logger"),
        Formatter::relative_source(),
        Formatter::time_format(Some(TimeLayout::Rfc3339), true),
        Formatter::times_format(None, true),
    ]);

    group.bench_function("time_attr", |b| {
        let attr = Attr::new("time", Utc::now());
        b.iter(|| {
            let mut attr = attr.clone();
            chain.apply(black_box(&mut attr));
            attr
        });
    });

    group.bench_function("plain_attr", |b| {
        let attr = Attr::new("user_id", 12345);
        b.iter(|| {
            let mut attr = attr.clone();
            chain.apply(black_box(&mut attr));
            attr
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let plain = LoggerBuilder::new()
        .set_writer(std::io::sink())
        .build()
        .unwrap();

    group.bench_function("info", |b| {
        b.iter(|| plain.info(black_box("Info message")));
    });

    group.bench_function("filtered_debug", |b| {
        b.iter(|| plain.debug(black_box("Debug message")));
    });

    let configured = LoggerBuilder::from_json(
        r#"{"level": "INFO", "AddSource": true, "TimeFormat": "RFC3339", "UTC": true,
            "Values": {"company": "cid", "version": 1}}"#,
    )
    .unwrap()
    .add_formatter(Formatter::relative_source())
    .add_provider(provider::from_context::<String>("request_id"))
    .set_writer(std::io::sink())
    .build()
    .unwrap();
    let ctx = LogContext::background().with_value("request_id", "abc-123".to_string());

    group.bench_function("configured_with_context", |b| {
        b.iter(|| configured.info_ctx(black_box(&ctx), black_box("Request handled")));
    });

    group.bench_function("structured_builder", |b| {
        b.iter(|| {
            configured
                .info_builder()
                .message("Request processed")
                .attr("user_id", 12345)
                .attr("latency_ms", 42.5)
                .context(&ctx)
                .log();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_formatter_chain, bench_logging);
criterion_main!(benches);
