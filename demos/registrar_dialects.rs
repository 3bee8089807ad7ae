//! Recovering the same property stream from several malformed payloads.
//!
//! Each input below is modeled on a real registrar's deviation from the
//! jCard grammar. The reader is handed a cursor positioned on the
//! `vcardArray` value, in strict mode, the way an RDAP processor would.
//!
//! Run with: cargo run --example registrar_dialects

use jcard_stream::{Event, JCardReader, JsonCursor, TokenCursor};
use std::error::Error;

fn read_positioned(label: &str, json: &str) -> Result<(), Box<dyn Error>> {
    let mut cursor = JsonCursor::new(json);
    for _ in 0..3 {
        cursor.advance()?;
    }

    let mut events = Vec::new();
    JCardReader::from_cursor(cursor, true).read_next(&mut events)?;

    println!("{label}:");
    for event in events {
        if let Event::Property(property) = event {
            println!("  {} = {:?}", property.name, property.value);
        }
    }
    println!();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    read_positioned(
        "markerless flat tuples",
        r#"{"vcardArray": [
            ["version", {}, "text", "4.0"],
            ["fn", {}, "text", "REACTIVATION PERIOD"]
        ]}"#,
    )?;

    read_positioned(
        "marker folded into first tuple",
        r#"{"vcardArray": [
            ["vcard", "version", {}, "text", "4.0"],
            ["fn", {}, "text", "101domain GRS Limited"]
        ]}"#,
    )?;

    read_positioned(
        "object-wrapped card with extra nesting",
        r#"{"vcardArray": [{"vcard": [[
            ["version", {}, "text", "4.0"],
            ["fn", {}, "text", "Whois Privacy Protection Service"]
        ]]}]}"#,
    )?;

    read_positioned(
        "bespoke record object",
        r#"{"vcardArray": {"properties": [
            {"name": "FN", "value": {"stringValue": "Domain Administrator", "typeName": "text"}},
            {"name": "TEL", "value": {"stringValue": "tel:+0.3478717726", "typeName": "uri"}}
        ]}}"#,
    )?;

    read_positioned(
        "per-property double wrapping",
        r#"{"vcardArray": ["vcard",
            [["version", {}, "text", "4.0"]],
            [["fn", {}, "text", "PT Pandi"]]
        ]}"#,
    )?;

    Ok(())
}
