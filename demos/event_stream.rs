//! Pulling events from a canonical jCard inside an RDAP response.
//!
//! Run with: cargo run --example event_stream

use jcard_stream::{events_from_str, Event};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let response = r#"{
        "objectClassName": "entity",
        "handle": "REGISTRANT-1",
        "vcardArray": ["vcard", [
            ["version", {}, "text", "4.0"],
            ["fn", {}, "text", "Domain Administrator"],
            ["org", {}, "text", "Example Registrations Inc"],
            ["adr", {"cc": "US"}, "text", ["", "", "1 Main St", "Phoenix", "AZ", "85016", "US"]],
            ["tel", {"type": ["work", "voice"]}, "uri", "tel:+1.5551234"],
            ["email", {}, "text", "admin@example.com"]
        ]]
    }"#;

    for event in events_from_str(response) {
        match event? {
            Event::CardStarted => println!("card:"),
            Event::Property(property) => {
                let data_type = property
                    .data_type
                    .as_ref()
                    .map_or("unknown", |data_type| data_type.as_str());
                println!("  {:12} ({}) {:?}", property.name, data_type, property.value);
            }
        }
    }

    Ok(())
}
