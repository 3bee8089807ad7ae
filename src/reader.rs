//! The streaming jCard reader and its dialect recovery engine.
//!
//! RFC 7095 gives jCard a simple grammar: an array opening with the string
//! `"vcard"`, followed by an array of property tuples. Registrars returning
//! RDAP contact data violate that grammar in reproducible ways, each in its
//! own style. [`JCardReader`] recognizes which of the known shapes it is
//! looking at and recovers the same canonical [`Property`] stream from every
//! one of them.
//!
//! The recognized shapes, keyed by the producer that ships them:
//!
//! - marker string folded into the first property tuple, then flat tuples
//! - marker array followed by a junk object, then flat tuples
//! - no marker at all, every top-level element directly a property tuple
//! - the same flat shape reached after a partial tuple failure
//! - the whole card wrapped in an object with a `"vcard"` field and an
//!   extra array layer
//! - a flat object with a `"properties"` field holding bespoke records
//! - property tuples not nested in an outer array
//! - the card duplicated into sibling arrays, of which only the first counts
//! - every property tuple individually wrapped in one extra array
//!
//! Recovery works by ordered attempts: each candidate shape either parses
//! the whole card or fails with a structural error, and a structural failure
//! hands control to the next candidate. Syntax and I/O errors are never
//! caught; a malformed byte stream is fatal no matter which shape it wears.
//!
//! ## Examples
//!
//! ```rust
//! use jcard_stream::{events_from_str, Event};
//!
//! let json = r#"["vcard", [
//!     ["version", {}, "text", "4.0"],
//!     ["fn", {}, "text", "Ada Lovelace"]
//! ]]"#;
//!
//! let events: Vec<Event> = events_from_str(json)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(events.len(), 3);
//! assert!(matches!(events[0], Event::CardStarted));
//! ```

use std::collections::VecDeque;
use std::io::Read;

use crate::cursor::{JsonCursor, Token, TokenCursor, TokenKind};
use crate::error::{Error, Result};
use crate::parameters::Parameters;
use crate::property::{DataType, Property};
use crate::value::{build_value, JsonValue};

/// Receives card data as it is read off the stream.
///
/// [`JCardReader::read_next`] calls [`begin_card`] exactly once per card it
/// finds, then [`read_property`] once per property in source order. A sink
/// that only needs the events as values can use the [`Events`] iterator
/// instead.
///
/// [`begin_card`]: CardSink::begin_card
/// [`read_property`]: CardSink::read_property
pub trait CardSink {
    /// A card has been found in the stream.
    fn begin_card(&mut self);

    /// One property has been read.
    fn read_property(&mut self, property: Property);
}

/// One unit of card data, in the order it appears in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A card has been found. Always precedes the card's properties.
    CardStarted,
    /// One property of the current card.
    Property(Property),
}

impl CardSink for Vec<Event> {
    fn begin_card(&mut self) {
        self.push(Event::CardStarted);
    }

    fn read_property(&mut self, property: Property) {
        self.push(Event::Property(property));
    }
}

/// A streaming jCard reader.
///
/// In the default lenient mode the reader scans forward through arbitrary
/// leading tokens until it finds the `"vcard"` marker, so it can be pointed
/// at a whole RDAP response rather than the extracted `vcardArray` value.
/// In strict mode ([`JCardReader::from_cursor`] with `strict = true`) the
/// cursor must already sit at the start of a card, and any other shape goes
/// straight into dialect recovery instead of being skipped.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::{Event, JCardReader};
///
/// let json = r#"{"vcardArray": ["vcard", [["fn", {}, "text", "A"]]]}"#;
/// let mut reader = JCardReader::from_str(json);
///
/// let mut events = Vec::new();
/// reader.read_next(&mut events).unwrap();
/// assert_eq!(events.len(), 2);
///
/// reader.read_next(&mut events).unwrap();
/// assert!(reader.eof());
/// ```
pub struct JCardReader<C: TokenCursor = JsonCursor> {
    cursor: C,
    strict: bool,
    eof: bool,
}

impl JCardReader<JsonCursor> {
    /// Creates a lenient reader over a JSON string.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(input: &str) -> Self {
        JCardReader::from_cursor(JsonCursor::new(input), false)
    }

    /// Creates a lenient reader over raw bytes. Invalid UTF-8 sequences are
    /// replaced rather than rejected.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        JCardReader::from_cursor(JsonCursor::new(String::from_utf8_lossy(bytes)), false)
    }

    /// Creates a lenient reader that drains the given byte source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading the source fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|e| Error::io(&e.to_string()))?;
        Ok(JCardReader::from_cursor(JsonCursor::new(input), false))
    }
}

impl<C: TokenCursor> JCardReader<C> {
    /// Wraps an externally supplied, possibly pre-positioned cursor.
    ///
    /// With `strict` set, the cursor's current token is expected to be at
    /// the start of a card; anything else is escalated into dialect
    /// recovery and, failing that, a structural error. With `strict`
    /// unset, the reader scans forward for the card marker.
    pub fn from_cursor(cursor: C, strict: bool) -> Self {
        JCardReader {
            cursor,
            strict,
            eof: false,
        }
    }

    /// Returns `true` once the end of the stream has been reached. Sticky:
    /// never reset.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Current line number of the underlying tokenizer, for diagnostics.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.cursor.line()
    }

    /// Consumes the reader, returning the underlying cursor.
    pub fn into_cursor(self) -> C {
        self.cursor
    }

    /// Converts the reader into a pull iterator over [`Event`]s.
    pub fn events(self) -> Events<C> {
        Events {
            reader: self,
            queue: VecDeque::new(),
            failed: false,
        }
    }

    /// Reads the next card from the stream, emitting it into `sink`.
    ///
    /// If a card is found, `sink` receives [`CardSink::begin_card`] exactly
    /// once followed by every property in source order. If the stream ends
    /// without another card, [`eof`] becomes `true` and the sink is not
    /// called. Calling again after `eof` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a structural error if no recognized shape matches, or a
    /// syntax or I/O error if the underlying bytes cannot be tokenized.
    /// Callers should treat any error as terminal for the stream.
    ///
    /// [`eof`]: JCardReader::eof
    pub fn read_next(&mut self, sink: &mut impl CardSink) -> Result<()> {
        if self.eof {
            return Ok(());
        }

        let mut prev = self.cursor.current().cloned();
        loop {
            let cur = self.cursor.advance()?;
            if cur == Token::Eof {
                self.eof = true;
                return Ok(());
            }

            // eurodns writes the marker as "vcards", so both spellings count
            let marker = matches!(prev, Some(Token::StartArray))
                && matches!(&cur, Token::String(s) if s == "vcard" || s == "vcards");
            if marker {
                return self.read_canonical_card(sink);
            }

            if self.strict {
                return self.recover_dialect(prev, cur, sink);
            }

            prev = Some(cur);
        }
    }

    /// Dispatches on the opening shape when the card marker is not where a
    /// conformant producer would put it. Called in strict mode only, with
    /// `prev` the token the cursor was positioned on and `cur` the token
    /// just read.
    fn recover_dialect(
        &mut self,
        prev: Option<Token>,
        cur: Token,
        sink: &mut impl CardSink,
    ) -> Result<()> {
        match prev {
            Some(Token::StartArray) => match cur {
                Token::StartArray => self.recover_nested_array(sink),
                Token::StartObject => {
                    let mut card = Vec::new();
                    if self.read_object_wrapped_card(&mut card)? {
                        emit_card(sink, card);
                    }
                    Ok(())
                }
                Token::String(actual) => Err(Error::unexpected_value(
                    "\"vcard\"",
                    &actual,
                    self.cursor.line(),
                )),
                other => Err(Error::unexpected_token(
                    TokenKind::String,
                    other.kind(),
                    self.cursor.line(),
                )),
            },
            Some(Token::StartObject) if matches!(&cur, Token::FieldName(name) if name == "properties") =>
            {
                let mut card = Vec::new();
                self.read_flat_object_card(&mut card)?;
                emit_card(sink, card);
                Ok(())
            }
            other => Err(Error::unexpected_token(
                TokenKind::StartArray,
                other.map_or(TokenKind::Eof, |t| t.kind()),
                self.cursor.line(),
            )),
        }
    }

    /// The outer array opened straight into another array. Peeks one more
    /// token to tell the marker-folded shapes from the markerless ones,
    /// then walks the attempt chain for that family. Failed attempts may
    /// leave properties in the shared buffer; the next attempt continues
    /// the same card rather than restarting it.
    fn recover_nested_array(&mut self, sink: &mut impl CardSink) -> Result<()> {
        let next = self.cursor.advance()?;
        let folded_marker = next
            .as_text()
            .is_some_and(|text| text.eq_ignore_ascii_case("vcard"));

        let mut card = Vec::new();
        if folded_marker {
            // 101domain folds the marker into the first tuple; dreamscape
            // puts it in its own array ahead of a junk object.
            self.cursor.advance()?;
            match self.read_bare_tuples(false, &mut card) {
                Ok(()) => {
                    emit_card(sink, card);
                    return Ok(());
                }
                Err(e) if e.is_structural() => {}
                Err(e) => return Err(e),
            }
            match self.skip_object_then_bare_tuples(&mut card) {
                Ok(()) => {
                    emit_card(sink, card);
                    Ok(())
                }
                Err(e) if e.is_structural() => {
                    let actual = self
                        .cursor
                        .current()
                        .and_then(Token::value_as_string)
                        .unwrap_or_default();
                    Err(Error::unexpected_value(
                        "\"vcard\"",
                        &actual,
                        self.cursor.line(),
                    ))
                }
                Err(e) => Err(e),
            }
        } else {
            // namecheap: no marker, the nested array is already the first
            // tuple and the cursor sits on its name. directnic is the same
            // flat shape picked up again after a partial tuple failure.
            match self.read_bare_tuples(false, &mut card) {
                Ok(()) => {
                    emit_card(sink, card);
                    Ok(())
                }
                Err(e) if e.is_structural() => {
                    self.read_skip_then_tuples(&mut card)?;
                    emit_card(sink, card);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
    }

    /// Canonical path: the marker has been consumed and the properties
    /// array follows. Also hosts the post-array recoveries for producers
    /// that append junk after an otherwise valid card.
    fn read_canonical_card(&mut self, sink: &mut impl CardSink) -> Result<()> {
        let mut card = Vec::new();
        match self.read_property_array(&mut card) {
            Ok(()) => {}
            Err(e)
                if e.is_structural()
                    && matches!(self.cursor.current(), Some(Token::String(_))) =>
            {
                // ascio omits the per-tuple arrays; the string we tripped
                // over is the first property name of a flat sequence.
                self.read_bare_tuples(false, &mut card)?;
                emit_card(sink, card);
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        match self.cursor.advance()? {
            Token::EndArray => {
                emit_card(sink, card);
                Ok(())
            }
            Token::StartArray => match self.cursor.advance()? {
                Token::String(_) => {
                    // 35.com duplicates the card into sibling arrays; only
                    // the first is authoritative. The rest of this array is
                    // abandoned where it stands.
                    emit_card(sink, card);
                    Ok(())
                }
                Token::StartArray => {
                    if matches!(self.cursor.advance()?, Token::String(_)) {
                        // pandi wraps each remaining tuple in its own array
                        self.read_double_wrapped_tuples(&mut card)?;
                        emit_card(sink, card);
                        Ok(())
                    } else {
                        Err(Error::unexpected_token(
                            TokenKind::EndArray,
                            self.cursor.current().map_or(TokenKind::Eof, Token::kind),
                            self.cursor.line(),
                        ))
                    }
                }
                other => Err(Error::unexpected_token(
                    TokenKind::EndArray,
                    other.kind(),
                    self.cursor.line(),
                )),
            },
            other => Err(Error::unexpected_token(
                TokenKind::EndArray,
                other.kind(),
                self.cursor.line(),
            )),
        }
    }

    /// Reads the canonical properties array: a start-array, then one nested
    /// array per property, then the matching end-array.
    fn read_property_array(&mut self, out: &mut Vec<Property>) -> Result<()> {
        self.expect_next(TokenKind::StartArray)?;
        loop {
            match self.cursor.advance()? {
                Token::EndArray => return Ok(()),
                Token::StartArray => {
                    self.cursor.advance()?;
                    self.parse_property_into(out)?;
                }
                other => {
                    return Err(Error::unexpected_token(
                        TokenKind::StartArray,
                        other.kind(),
                        self.cursor.line(),
                    ))
                }
            }
        }
    }

    /// Reads a flat sequence of property tuples that are not nested in an
    /// outer array, until an end-array closes the sequence.
    ///
    /// With `skip_first` set, the cursor is one token short of the first
    /// tuple and an extra advance is taken before parsing it.
    fn read_bare_tuples(&mut self, skip_first: bool, out: &mut Vec<Property>) -> Result<()> {
        let mut parsed = usize::from(skip_first);
        loop {
            if parsed >= 1 {
                self.cursor.advance()?;
            }
            self.parse_property_into(out)?;
            parsed += 1;
            match self.cursor.advance()? {
                Token::EndArray => return Ok(()),
                Token::Eof => {
                    return Err(Error::unexpected_token(
                        TokenKind::EndArray,
                        TokenKind::Eof,
                        self.cursor.line(),
                    ))
                }
                _ => {}
            }
        }
    }

    /// dreamscape prefixes its flat tuples with a junk object. Strides two
    /// tokens at a time until the object closes, then reads the tuples.
    fn skip_object_then_bare_tuples(&mut self, out: &mut Vec<Property>) -> Result<()> {
        loop {
            if self.cursor.advance()? == Token::Eof {
                return Err(Error::unexpected_token(
                    TokenKind::EndObject,
                    TokenKind::Eof,
                    self.cursor.line(),
                ));
            }
            match self.cursor.advance()? {
                Token::EndObject => break,
                Token::Eof => {
                    return Err(Error::unexpected_token(
                        TokenKind::EndObject,
                        TokenKind::Eof,
                        self.cursor.line(),
                    ))
                }
                _ => {}
            }
        }
        self.read_bare_tuples(true, out)
    }

    /// Continuation of a failed flat-tuple attempt: advance past the token
    /// that tripped it, then keep parsing tuples. Errors here are fatal.
    fn read_skip_then_tuples(&mut self, out: &mut Vec<Property>) -> Result<()> {
        loop {
            self.cursor.advance()?;
            self.parse_property_into(out)?;
            match self.cursor.advance()? {
                Token::EndArray => return Ok(()),
                Token::Eof => {
                    return Err(Error::unexpected_token(
                        TokenKind::EndArray,
                        TokenKind::Eof,
                        self.cursor.line(),
                    ))
                }
                _ => {}
            }
        }
    }

    /// pandi wraps each property tuple in an extra array layer. The cursor
    /// sits on the first such tuple's name; one wrapper has already been
    /// consumed by the caller.
    fn read_double_wrapped_tuples(&mut self, out: &mut Vec<Property>) -> Result<()> {
        self.parse_property_into(out)?;
        self.expect_next(TokenKind::EndArray)?;
        loop {
            match self.cursor.advance()? {
                Token::EndArray => return Ok(()),
                Token::StartArray => {
                    self.expect_next(TokenKind::StartArray)?;
                    self.cursor.advance()?;
                    self.parse_property_into(out)?;
                    self.expect_next(TokenKind::EndArray)?;
                }
                other => {
                    return Err(Error::unexpected_token(
                        TokenKind::StartArray,
                        other.kind(),
                        self.cursor.line(),
                    ))
                }
            }
        }
    }

    /// onomae wraps the card in an object with a `"vcard"` field whose
    /// value nests the property tuples one array layer too deep.
    ///
    /// Returns `true` if a card was actually present in the object.
    fn read_object_wrapped_card(&mut self, out: &mut Vec<Property>) -> Result<bool> {
        let token = self.cursor.advance()?;
        let is_card =
            matches!(&token, Token::FieldName(name) if name.eq_ignore_ascii_case("vcard"));
        if is_card {
            self.expect_next(TokenKind::StartArray)?;
            self.expect_next(TokenKind::StartArray)?;
            loop {
                match self.cursor.advance()? {
                    Token::EndArray => break,
                    Token::StartArray => {
                        self.cursor.advance()?;
                        self.parse_property_into(out)?;
                    }
                    other => {
                        return Err(Error::unexpected_token(
                            TokenKind::StartArray,
                            other.kind(),
                            self.cursor.line(),
                        ))
                    }
                }
            }
            self.expect_next(TokenKind::EndArray)?;
        }
        self.expect_next(TokenKind::EndObject)?;
        Ok(is_card)
    }

    /// namesilo abandons the tuple grammar entirely and ships an object
    /// whose `"properties"` field is an array of bespoke records. The
    /// cursor sits on that field name.
    fn read_flat_object_card(&mut self, out: &mut Vec<Property>) -> Result<()> {
        self.expect_next(TokenKind::StartArray)?;
        loop {
            match self.cursor.advance()? {
                Token::EndArray => break,
                Token::StartObject => {
                    let record = build_value(&mut self.cursor)?;
                    if let Some(property) = flat_record_to_property(&record) {
                        out.push(property);
                    }
                }
                other => {
                    return Err(Error::unexpected_token(
                        TokenKind::StartObject,
                        other.kind(),
                        self.cursor.line(),
                    ))
                }
            }
        }
        self.expect_next(TokenKind::EndObject)
    }

    /// Parses one property tuple with the cursor on its first interior
    /// token. An immediate end-array (empty tuple) is a deliberate no-op.
    fn parse_property_into(&mut self, out: &mut Vec<Property>) -> Result<()> {
        let name = match self.cursor.current() {
            Some(Token::String(s)) => s.to_ascii_lowercase(),
            Some(Token::EndArray) => return Ok(()),
            other => {
                return Err(Error::unexpected_token(
                    TokenKind::String,
                    other.map_or(TokenKind::Eof, Token::kind),
                    self.cursor.line(),
                ))
            }
        };

        let mut parameters = match self.parse_parameters()? {
            Some(parameters) => {
                // parameters were present, so the data type string follows
                self.expect_next(TokenKind::String)?;
                parameters
            }
            // dinahosting omits the parameters slot entirely; the cursor is
            // already on the data type string
            None => Parameters::new(),
        };
        let group = parameters.remove_all("group").into_iter().next();

        let type_text = self
            .cursor
            .current()
            .and_then(Token::as_text)
            .unwrap_or_default()
            .to_ascii_lowercase();
        let data_type = if type_text == "unknown" {
            None
        } else {
            Some(DataType::get(&type_text))
        };

        let mut value = Vec::new();
        loop {
            match self.cursor.advance()? {
                Token::EndArray => break,
                Token::Eof => {
                    return Err(Error::unexpected_token(
                        TokenKind::EndArray,
                        TokenKind::Eof,
                        self.cursor.line(),
                    ))
                }
                _ => value.push(build_value(&mut self.cursor)?),
            }
        }

        out.push(Property {
            group,
            name,
            parameters,
            data_type,
            value,
        });
        Ok(())
    }

    /// Parses the parameters slot of a property tuple.
    ///
    /// Returns `None` if the slot was omitted and the cursor already rests
    /// on the data type string; `Some` otherwise, with the cursor on the
    /// closing token of the parameters.
    fn parse_parameters(&mut self) -> Result<Option<Parameters>> {
        match self.cursor.advance()? {
            Token::StartArray => {
                // name.com writes parameters as an array instead of an
                // object; every observed instance is empty, so the contents
                // are drained and discarded
                loop {
                    match self.cursor.advance()? {
                        Token::EndArray => break,
                        Token::Eof => {
                            return Err(Error::unexpected_token(
                                TokenKind::EndArray,
                                TokenKind::Eof,
                                self.cursor.line(),
                            ))
                        }
                        _ => {}
                    }
                }
                Ok(Some(Parameters::new()))
            }
            Token::String(_) => Ok(None),
            Token::StartObject => {
                let mut parameters = Parameters::new();
                loop {
                    match self.cursor.advance()? {
                        Token::EndObject => break,
                        Token::FieldName(name) => match self.cursor.advance()? {
                            Token::StartArray => loop {
                                match self.cursor.advance()? {
                                    Token::EndArray => break,
                                    Token::Eof => {
                                        return Err(Error::unexpected_token(
                                            TokenKind::EndArray,
                                            TokenKind::Eof,
                                            self.cursor.line(),
                                        ))
                                    }
                                    token => {
                                        if let Some(text) = token.value_as_string() {
                                            parameters.put(&name, text);
                                        }
                                    }
                                }
                            },
                            token => {
                                if let Some(text) = token.value_as_string() {
                                    parameters.put(&name, text);
                                }
                            }
                        },
                        other => {
                            return Err(Error::unexpected_token(
                                TokenKind::FieldName,
                                other.kind(),
                                self.cursor.line(),
                            ))
                        }
                    }
                }
                Ok(Some(parameters))
            }
            other => Err(Error::unexpected_token(
                TokenKind::StartObject,
                other.kind(),
                self.cursor.line(),
            )),
        }
    }

    fn expect_next(&mut self, expected: TokenKind) -> Result<()> {
        let actual = self.cursor.advance()?;
        if actual.kind() == expected {
            Ok(())
        } else {
            Err(Error::unexpected_token(
                expected,
                actual.kind(),
                self.cursor.line(),
            ))
        }
    }
}

fn emit_card(sink: &mut impl CardSink, card: Vec<Property>) {
    sink.begin_card();
    for property in card {
        sink.read_property(property);
    }
}

/// Maps one bespoke `{name, value: {...}}` record to a property.
///
/// Returns `None` for records with an empty name or no value; those are
/// skipped without error.
fn flat_record_to_property(record: &JsonValue) -> Option<Property> {
    let map = record.as_object()?;
    let name = map.get("name").and_then(JsonValue::as_str)?;
    if name.is_empty() {
        return None;
    }
    let value = map.get("value").and_then(JsonValue::as_object)?;

    let type_text = value
        .get("typeName")
        .and_then(JsonValue::as_str)
        .unwrap_or("unknown")
        .to_ascii_lowercase();
    let data_type = if type_text == "unknown" {
        None
    } else {
        Some(DataType::get(&type_text))
    };

    let mut values = Vec::new();
    if let Some(text) = value.get("stringValue").and_then(JsonValue::as_str) {
        values.push(JsonValue::from(text));
    } else if let Some(components) = value
        .get("components")
        .and_then(JsonValue::as_array)
        .filter(|components| !components.is_empty())
    {
        let parts = components.iter().map(flat_component_value).collect();
        values.push(JsonValue::Array(parts));
    }

    Some(Property {
        group: None,
        name: name.to_ascii_lowercase(),
        parameters: Parameters::new(),
        data_type,
        value: values,
    })
}

/// Resolves one component of a structured record value: a `"values"` list
/// collapses to the list of its string values, a bare `"stringValue"` to
/// that scalar, anything else to null.
fn flat_component_value(component: &JsonValue) -> JsonValue {
    let Some(value) = component
        .as_object()
        .and_then(|map| map.get("value"))
        .and_then(JsonValue::as_object)
    else {
        return JsonValue::Null;
    };

    if let Some(items) = value.get("values").and_then(JsonValue::as_array) {
        let parts = items
            .iter()
            .map(|item| {
                item.as_object()
                    .and_then(|map| map.get("stringValue"))
                    .cloned()
                    .unwrap_or(JsonValue::Null)
            })
            .collect();
        return JsonValue::Array(parts);
    }
    if let Some(text) = value.get("stringValue") {
        return text.clone();
    }
    JsonValue::Null
}

/// Pull iterator over the [`Event`]s of a stream, card by card.
///
/// Yields `Err` at most once; after an error the iterator is fused.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::{events_from_str, Event};
///
/// let count = events_from_str(r#"["vcard", [["fn", {}, "text", "A"]]]"#)
///     .filter(|event| matches!(event, Ok(Event::Property(_))))
///     .count();
/// assert_eq!(count, 1);
/// ```
pub struct Events<C: TokenCursor = JsonCursor> {
    reader: JCardReader<C>,
    queue: VecDeque<Event>,
    failed: bool,
}

impl<C: TokenCursor> Iterator for Events<C> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Result<Event>> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(Ok(event));
            }
            if self.failed || self.reader.eof() {
                return None;
            }
            let mut buffer = Vec::new();
            match self.reader.read_next(&mut buffer) {
                Ok(()) => self.queue.extend(buffer),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
