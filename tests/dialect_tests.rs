//! End-to-end tests for the registrar dialect recovery paths.
//!
//! Strict-mode fixtures mirror how RDAP processing hands the reader a
//! pre-positioned cursor: the test advances past the `vcardArray` field name
//! so the reader's current token is the start of the card value.

use jcard_stream::{
    DataType, Event, JCardReader, JsonCursor, JsonValue, Property, TokenCursor,
};

fn strict_reader(json: &str) -> JCardReader<JsonCursor> {
    let mut cursor = JsonCursor::new(json);
    // step onto the value of the "vcardArray" field
    for _ in 0..3 {
        cursor.advance().unwrap();
    }
    JCardReader::from_cursor(cursor, true)
}

fn read_card(reader: &mut JCardReader<JsonCursor>) -> Vec<Event> {
    let mut events = Vec::new();
    reader.read_next(&mut events).expect("read_next failed");
    events
}

fn properties(events: &[Event]) -> Vec<&Property> {
    assert_eq!(events.first(), Some(&Event::CardStarted));
    events
        .iter()
        .skip(1)
        .map(|event| match event {
            Event::Property(property) => property,
            Event::CardStarted => panic!("second card started mid-stream"),
        })
        .collect()
}

#[test]
fn canonical_card_in_rdap_response() {
    let json = r#"{
        "objectClassName": "entity",
        "handle": "REGISTRANT-1",
        "vcardArray": ["vcard", [
            ["version", {}, "text", "4.0"],
            ["fn", {}, "text", "Domain Administrator"],
            ["adr", {"cc": "US"}, "text", ["", "", "1 Main St", "Phoenix", "AZ", "85016", "US"]],
            ["tel", {"type": ["work", "voice"]}, "uri", "tel:+1.5551234"]
        ]]
    }"#;

    let mut reader = JCardReader::from_str(json);
    let events = read_card(&mut reader);
    let props = properties(&events);

    assert_eq!(props.len(), 4);
    assert_eq!(props[0].name, "version");
    assert_eq!(props[0].value, vec![JsonValue::from("4.0")]);
    assert_eq!(props[1].value_as_str(), Some("Domain Administrator"));
    assert_eq!(props[2].parameters.first("cc"), Some("US"));
    assert_eq!(props[2].value[0].as_array().unwrap().len(), 7);
    assert_eq!(props[3].data_type, Some(DataType::uri()));
    assert_eq!(props[3].parameters.get("type"), &["work", "voice"]);

    read_card(&mut reader);
    assert!(reader.eof());
}

#[test]
fn markerless_flat_tuples() {
    // namecheap: no "vcard" string, tuples directly in the outer array
    let json = r#"{"vcardArray": [
        ["version", {}, "text", "4.0"],
        ["fn", {}, "text", "REACTIVATION PERIOD"]
    ]}"#;

    let mut reader = strict_reader(json);
    let props_events = read_card(&mut reader);
    let props = properties(&props_events);
    assert_eq!(props.len(), 2);
    assert_eq!(props[0].name, "version");
    assert_eq!(props[1].value_as_str(), Some("REACTIVATION PERIOD"));
}

#[test]
fn marker_folded_into_first_tuple() {
    // 101domain: "vcard" appears as the first element of the first tuple
    let json = r#"{"vcardArray": [
        ["vcard", "version", {}, "text", "4.0"],
        ["fn", {}, "text", "101domain GRS Limited"]
    ]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props.len(), 2);
    assert_eq!(props[0].name, "version");
    assert_eq!(props[1].value_as_str(), Some("101domain GRS Limited"));
}

#[test]
fn marker_array_with_junk_object_prefix() {
    // dreamscape: a marker-bearing array holding an extra object before the
    // flat tuples
    let json = r#"{"vcardArray": [
        ["vcard", {"a": {}}, "version", {}, "text", "4.0"],
        ["fn", {}, "text", "Dreamscape Networks"]
    ]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props.len(), 2);
    assert_eq!(props[0].name, "version");
    assert_eq!(props[0].value_as_str(), Some("4.0"));
    assert_eq!(props[1].name, "fn");
}

#[test]
fn flat_tuples_behind_extra_nesting() {
    // directnic: the flat-tuple attempt trips on the extra array layer and
    // the continuation picks the same card back up
    let json = r#"{"vcardArray": [[
        ["version", {}, "text", "4.0"],
        ["fn", {}, "text", "Directnic"]
    ]]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props.len(), 2);
    assert_eq!(props[0].name, "version");
    assert_eq!(props[1].value_as_str(), Some("Directnic"));
}

#[test]
fn object_wrapped_card_with_extra_array_layer() {
    // onomae: card wrapped in an object, tuples nested one layer too deep
    let json = r#"{"vcardArray": [{"vcard": [[
        ["version", {}, "text", "4.0"],
        ["fn", {}, "text", "Whois Privacy Protection Service"],
        ["adr", {"type": "work"}, "text", ["Cerulean Tower 11F", "Tokyo", "JP"]]
    ]]}]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props.len(), 3);
    assert_eq!(props[2].parameters.get("type"), &["work"]);
    assert_eq!(props[2].value[0].as_array().unwrap().len(), 3);
}

#[test]
fn bespoke_record_object() {
    // namesilo: an object with a "properties" field of custom records
    let json = r#"{"vcardArray": {"properties": [
        {"name": "FN", "value": {"stringValue": "Domain Administrator", "typeName": "text"}},
        {"name": "ADR", "value": {"components": [
            {"name": "pobox", "value": {"typeName": "text"}},
            {"name": "street", "value": {"values": [
                {"stringValue": "1928 E. Highland Ave.", "typeName": "text"},
                {"stringValue": "PMB# 255", "typeName": "text"}
            ], "typeName": "text"}},
            {"name": "locality", "value": {"values": [
                {"stringValue": "Phoenix", "typeName": "text"}
            ], "typeName": "text"}}
        ], "typeName": "text"}},
        {"name": "", "value": {"stringValue": "skipped", "typeName": "text"}},
        {"name": "TEL", "value": {"stringValue": "tel:+0.3478717726", "typeName": "uri"}},
        {"name": "NOTE", "value": {"stringValue": "untyped"}}
    ]}}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);

    // the empty-name record is skipped
    assert_eq!(props.len(), 4);

    assert_eq!(props[0].name, "fn");
    assert_eq!(props[0].data_type, Some(DataType::text()));
    assert_eq!(props[0].value, vec![JsonValue::from("Domain Administrator")]);
    assert!(props[0].parameters.is_empty());
    assert_eq!(props[0].group, None);

    let adr = props[1].value[0].as_array().unwrap();
    assert_eq!(adr.len(), 3);
    assert!(adr[0].is_null());
    let street = adr[1].as_array().unwrap();
    assert_eq!(street[0].as_str(), Some("1928 E. Highland Ave."));
    assert_eq!(street[1].as_str(), Some("PMB# 255"));
    assert_eq!(adr[2].as_array().unwrap()[0].as_str(), Some("Phoenix"));

    assert_eq!(props[2].data_type, Some(DataType::uri()));
    assert_eq!(props[3].data_type, None);
}

#[test]
fn tuples_without_per_property_arrays() {
    // ascio: properties follow the marker with no nesting arrays of their own
    let json = r#"{"vcardArray": ["vcard",
        ["version", {}, "text", "4.0"],
        ["fn", {}, "text", "Ascio Technologies, Inc"]
    ]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props.len(), 2);
    assert_eq!(props[1].value_as_str(), Some("Ascio Technologies, Inc"));
}

#[test]
fn sibling_duplicate_array_is_ignored() {
    let json = r#"{"vcardArray": ["vcard",
        [["version", {}, "text", "4.0"], ["fn", {}, "text", "authoritative"]],
        ["version", {}, "text", "4.0"]
    ]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props.len(), 2);
    assert_eq!(props[1].value_as_str(), Some("authoritative"));
}

#[test]
fn per_property_double_wrapping() {
    // pandi: every tuple carries its own extra array layer
    let json = r#"{"vcardArray": ["vcard",
        [["version", {}, "text", "4.0"]],
        [["fn", {}, "text", "PT Pandi"]],
        [["email", {}, "text", "info@pandi.id"]]
    ]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props.len(), 3);
    assert_eq!(props[0].name, "version");
    assert_eq!(props[1].name, "fn");
    assert_eq!(props[2].value_as_str(), Some("info@pandi.id"));
}

#[test]
fn empty_parameter_array() {
    // name.com ships parameters as an empty array instead of an object
    let json = r#"{"vcardArray": ["vcard", [["fn", [], "text", "Name.com"]]]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert!(props[0].parameters.is_empty());
    assert_eq!(props[0].value_as_str(), Some("Name.com"));
}

#[test]
fn omitted_parameters_slot() {
    // dinahosting drops the parameters slot; the type string follows the name
    let json = r#"{"vcardArray": ["vcard", [
        ["contact-uri", "uri", "https://dinahosting.com/whois/ysana.info"]
    ]]}"#;

    let mut reader = strict_reader(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props[0].name, "contact-uri");
    assert_eq!(props[0].data_type, Some(DataType::uri()));
}

#[test]
fn unrecognized_shape_emits_nothing() {
    let json = r#"{"vcardArray": ["foo", "bar"]}"#;

    let mut reader = strict_reader(json);
    let mut events = Vec::new();
    let err = reader.read_next(&mut events).unwrap_err();
    assert!(err.is_structural());
    assert!(err.to_string().contains("foo"));
    assert!(events.is_empty());
}

#[test]
fn wrong_token_kind_in_strict_mode() {
    let json = r#"{"vcardArray": [42]}"#;

    let mut reader = strict_reader(json);
    let mut events = Vec::new();
    let err = reader.read_next(&mut events).unwrap_err();
    assert!(err.is_structural());
    assert!(events.is_empty());
}

#[test]
fn group_pseudo_parameter() {
    let json = r#"["vcard", [["tel", {"group": "item1", "type": "voice"}, "uri", "tel:+1"]]]"#;

    let mut reader = JCardReader::from_str(json);
    let events = read_card(&mut reader);
    let props = properties(&events);
    assert_eq!(props[0].group.as_deref(), Some("item1"));
    assert_eq!(props[0].parameters.get("type"), &["voice"]);
    assert!(props[0].parameters.get("group").is_empty());
}

#[test]
fn eof_is_sticky_and_silent() {
    let mut reader = JCardReader::from_str(r#"{"no": "card"}"#);
    let mut events = Vec::new();
    reader.read_next(&mut events).unwrap();
    assert!(reader.eof());
    assert!(events.is_empty());

    reader.read_next(&mut events).unwrap();
    assert!(events.is_empty());
}

#[test]
fn invalid_json_is_fatal_not_recovered() {
    let mut reader = JCardReader::from_str(r#"["vcard", [["fn", {}, "text", %]]"#);
    let mut events = Vec::new();
    let err = reader.read_next(&mut events).unwrap_err();
    assert!(!err.is_structural());
}

#[test]
fn serialize_recovered_property() {
    let json = r#"["vcard", [["fn", {"type": "work"}, "text", "A"]]]"#;
    let mut reader = JCardReader::from_str(json);
    let events = read_card(&mut reader);
    let props = properties(&events);

    let serialized = serde_json::to_value(props[0]).unwrap();
    assert_eq!(serialized["name"], "fn");
    assert_eq!(serialized["data_type"], "text");
    assert_eq!(serialized["parameters"]["type"][0], "work");
}
