use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jcard_stream::{JCardReader, JsonCursor, TokenCursor};

fn canonical_card(properties: usize) -> String {
    let mut json = String::from(r#"["vcard", ["#);
    for i in 0..properties {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!(
            r#"["x-field-{i}", {{"type": "work"}}, "text", "value {i}"]"#
        ));
    }
    json.push_str("]]");
    json
}

fn count_events(json: &str) -> usize {
    JCardReader::from_str(json).events().count()
}

fn benchmark_canonical(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_card");

    for size in [10, 50, 100, 500].iter() {
        let json = canonical_card(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| count_events(black_box(json)))
        });
    }
    group.finish();
}

fn benchmark_lenient_scan(c: &mut Criterion) {
    // the card buried at the end of a large RDAP-style response
    let mut json = String::from(r#"{"padding": ["#);
    for i in 0..500 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!(r#""entry {i}""#));
    }
    json.push_str(r#"], "vcardArray": ["vcard", [["fn", {}, "text", "A"]]]}"#);

    c.bench_function("lenient_scan_to_card", |b| {
        b.iter(|| count_events(black_box(&json)))
    });
}

fn benchmark_dialect_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialect_recovery");

    // markerless flat tuples, entered through the strict attempt chain
    let markerless = r#"{"vcardArray": [
        ["version", {}, "text", "4.0"],
        ["fn", {}, "text", "REACTIVATION PERIOD"],
        ["email", {}, "text", "info@example.com"]
    ]}"#;

    // bespoke record object with structured components
    let records = r#"{"vcardArray": {"properties": [
        {"name": "FN", "value": {"stringValue": "Domain Administrator", "typeName": "text"}},
        {"name": "ADR", "value": {"components": [
            {"name": "street", "value": {"values": [
                {"stringValue": "1 Main St", "typeName": "text"}
            ], "typeName": "text"}}
        ], "typeName": "text"}}
    ]}}"#;

    for (label, json) in [("markerless_tuples", markerless), ("record_object", records)] {
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut cursor = JsonCursor::new(black_box(json));
                for _ in 0..3 {
                    cursor.advance().unwrap();
                }
                let mut events = Vec::new();
                JCardReader::from_cursor(cursor, true)
                    .read_next(&mut events)
                    .unwrap();
                events.len()
            })
        });
    }
    group.finish();
}

fn benchmark_tokenizer(c: &mut Criterion) {
    let json = canonical_card(100);

    c.bench_function("tokenize_only", |b| {
        b.iter(|| {
            let mut cursor = JsonCursor::new(black_box(&json));
            let mut count = 0usize;
            while cursor.advance().unwrap() != jcard_stream::Token::Eof {
                count += 1;
            }
            count
        })
    });
}

criterion_group!(
    benches,
    benchmark_canonical,
    benchmark_lenient_scan,
    benchmark_dialect_recovery,
    benchmark_tokenizer
);
criterion_main!(benches);
