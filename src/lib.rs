//! # jcard_stream
//!
//! A streaming reader for jCard (RFC 7095), the JSON encoding of vCard, built
//! for the malformed payloads that domain registrars actually produce.
//!
//! ## Why another jCard parser?
//!
//! Parsing conformant jCard is trivial. The hard part is that WHOIS/RDAP
//! responses in the wild violate the grammar in about a dozen distinct,
//! reproducible ways: markers folded into property tuples, missing wrapper
//! arrays, object-wrapped cards, duplicated sibling arrays, and one registrar
//! that abandons the tuple grammar entirely for a bespoke record schema.
//! `jcard_stream` recognizes which dialect it is reading and recovers the
//! same canonical property stream from every one of them, failing predictably
//! when none match.
//!
//! ## Key Features
//!
//! - **Dialect Recovery**: nine known registrar deviations are recognized and
//!   normalized to the canonical property stream
//! - **Streaming**: single-pass, forward-only, no document tree for the
//!   canonical path
//! - **Pluggable Tokenizer**: the engine reads through the [`TokenCursor`]
//!   trait; the built-in [`JsonCursor`] works out of the box
//! - **Two Output Styles**: a push-style [`CardSink`] or a pull-style
//!   [`Events`] iterator
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! jcard-stream = "0.1"
//! ```
//!
//! ### Reading a card
//!
//! ```rust
//! use jcard_stream::{events_from_str, Event};
//!
//! let json = r#"{"vcardArray": ["vcard", [
//!     ["version", {}, "text", "4.0"],
//!     ["fn", {}, "text", "Ada Lovelace"],
//!     ["email", {"type": "work"}, "text", "ada@example.com"]
//! ]]}"#;
//!
//! for event in events_from_str(json) {
//!     match event.unwrap() {
//!         Event::CardStarted => println!("card"),
//!         Event::Property(property) => println!("  {}", property.name),
//!     }
//! }
//! ```
//!
//! ### Push-style with a custom sink
//!
//! ```rust
//! use jcard_stream::{CardSink, JCardReader, Property};
//!
//! struct Names(Vec<String>);
//!
//! impl CardSink for Names {
//!     fn begin_card(&mut self) {}
//!     fn read_property(&mut self, property: Property) {
//!         if property.name == "fn" {
//!             self.0.extend(property.value_as_str().map(String::from));
//!         }
//!     }
//! }
//!
//! let mut names = Names(Vec::new());
//! let mut reader = JCardReader::from_str(r#"["vcard", [["fn", {}, "text", "A"]]]"#);
//! while !reader.eof() {
//!     reader.read_next(&mut names).unwrap();
//! }
//! assert_eq!(names.0, vec!["A"]);
//! ```
//!
//! ## Lenient vs. strict
//!
//! The default constructors are lenient: they scan forward through any
//! leading JSON until the `"vcard"` marker appears, so a whole RDAP entity
//! response can be fed in unmodified. Strict mode
//! ([`JCardReader::from_cursor`]) expects an already-positioned cursor and
//! escalates unexpected shapes into dialect recovery instead of skipping
//! them; this is the mode that handles the heavily malformed registrar
//! payloads.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - No panics in the public API
//!
//! ## Examples
//!
//! See the `demos/` directory for focused, runnable examples:
//!
//! - **`event_stream.rs`** - Pulling events from a canonical card
//! - **`registrar_dialects.rs`** - Recovering several malformed payloads
//!
//! Run any example with: `cargo run --example <name>`

pub mod cursor;
pub mod error;
pub mod parameters;
pub mod property;
pub mod reader;
pub mod value;

pub use cursor::{JsonCursor, Token, TokenCursor, TokenKind};
pub use error::{Error, Result};
pub use parameters::Parameters;
pub use property::{DataType, Property};
pub use reader::{CardSink, Event, Events, JCardReader};
pub use value::{JsonValue, Number, ValueMap};

use std::io;

/// Iterates over the [`Event`]s of a jCard stream held in a string.
///
/// Lenient: leading tokens before the card marker are skipped.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::{events_from_str, Event};
///
/// let events: Vec<Event> = events_from_str(r#"["vcard", [["fn", {}, "text", "A"]]]"#)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(events.len(), 2);
/// ```
#[must_use]
pub fn events_from_str(input: &str) -> Events {
    JCardReader::from_str(input).events()
}

/// Iterates over the [`Event`]s of a jCard stream held in a byte slice.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
#[must_use]
pub fn events_from_slice(bytes: &[u8]) -> Events {
    JCardReader::from_slice(bytes).events()
}

/// Iterates over the [`Event`]s of a jCard stream read from an I/O source.
///
/// The source is drained eagerly before parsing begins.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::{events_from_reader, Event};
/// use std::io::Cursor;
///
/// let source = Cursor::new(br#"["vcard", [["fn", {}, "text", "A"]]]"#.to_vec());
/// let events: Vec<Event> = events_from_reader(source)
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(events.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading the source fails.
pub fn events_from_reader<R: io::Read>(reader: R) -> Result<Events> {
    Ok(JCardReader::from_reader(reader)?.events())
}
