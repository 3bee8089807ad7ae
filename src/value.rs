//! Algebraic JSON values for property data.
//!
//! This module provides [`JsonValue`], the representation of one element of
//! a property's value sequence. Values are assembled eagerly from the token
//! stream by [`build_value`] and are immutable once built; the reader hands
//! them to the listener inside a [`crate::Property`] and keeps no copy.
//!
//! ## Core Types
//!
//! - [`JsonValue`]: any JSON value (null, bool, number, string, array,
//!   object)
//! - [`Number`]: an integer or floating-point numeric value
//! - [`ValueMap`]: the insertion-ordered map used for object fields
//!
//! ## Examples
//!
//! ```rust
//! use jcard_stream::JsonValue;
//!
//! let value = JsonValue::from("4.0");
//! assert!(value.is_string());
//! assert_eq!(value.as_str(), Some("4.0"));
//! ```

use crate::cursor::{Token, TokenCursor, TokenKind};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered map of object fields.
///
/// jCard producers rely on field order nowhere, but preserving it keeps
/// output deterministic and diffs readable.
pub type ValueMap = IndexMap<String, JsonValue>;

/// A dynamically-typed representation of any JSON value found in a property.
///
/// Structural equality only; a value has no identity beyond its content.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::{JsonValue, Number};
///
/// let null = JsonValue::Null;
/// let num = JsonValue::Number(Number::Integer(42));
/// let text = JsonValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    Object(ValueMap),
}

/// A numeric value, preserving the integer/float distinction of the source
/// token.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(2.5).as_f64(), 2.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is integral.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jcard_stream::Number;
    ///
    /// assert_eq!(Number::Integer(7).as_i64(), Some(7));
    /// assert_eq!(Number::Float(7.0).as_i64(), Some(7));
    /// assert_eq!(Number::Float(7.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl JsonValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise
    /// returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jcard_stream::JsonValue;
    ///
    /// assert_eq!(JsonValue::from("work").as_str(), Some("work"));
    /// assert_eq!(JsonValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integral number, returns it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to its fields.
    /// Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            JsonValue::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Number(Number::from(value))
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(Number::from(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(Number::from(value))
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in s.chars() {
        match ch {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for JsonValue {
    /// Renders the value as compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => write!(f, "null"),
            JsonValue::Bool(b) => write!(f, "{}", b),
            JsonValue::Number(n) => write!(f, "{}", n),
            JsonValue::String(s) => write_escaped(f, s),
            JsonValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            JsonValue::Object(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write_escaped(f, key)?;
                    write!(f, ":{}", value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            JsonValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(fields) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct JsonValueVisitor;

        impl<'de> Visitor<'de> for JsonValueVisitor {
            type Value = JsonValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(JsonValue::Number(Number::Integer(value as i64)))
                } else {
                    Ok(JsonValue::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(JsonValue::Array(items))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut fields = ValueMap::new();
                while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
                    fields.insert(key, value);
                }
                Ok(JsonValue::Object(fields))
            }
        }

        deserializer.deserialize_any(JsonValueVisitor)
    }
}

/// Assembles a [`JsonValue`] from the cursor's current position.
///
/// The current token must be the first token of the value: a start-of-array
/// yields an ordered list, a start-of-object a field map, anything else a
/// scalar. On return the cursor sits on the value's last token (the matching
/// close for containers). Field positions inside objects must hold
/// field-name tokens; any other shape is a structural error.
pub(crate) fn build_value<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<JsonValue> {
    let Some(current) = cursor.current() else {
        return Err(Error::unexpected_token(
            TokenKind::String,
            TokenKind::Eof,
            cursor.line(),
        ));
    };
    match current.clone() {
        Token::StartArray => {
            let mut items = Vec::new();
            while cursor.advance()?.kind() != TokenKind::EndArray {
                items.push(build_value(cursor)?);
            }
            Ok(JsonValue::Array(items))
        }
        Token::StartObject => {
            let mut fields = ValueMap::new();
            loop {
                let token = cursor.advance()?;
                if token.kind() == TokenKind::EndObject {
                    break;
                }
                let Token::FieldName(key) = token else {
                    return Err(Error::unexpected_token(
                        TokenKind::FieldName,
                        token.kind(),
                        cursor.line(),
                    ));
                };
                cursor.advance()?;
                let value = build_value(cursor)?;
                fields.insert(key, value);
            }
            Ok(JsonValue::Object(fields))
        }
        Token::String(s) => Ok(JsonValue::String(s)),
        Token::Number(n) => Ok(JsonValue::Number(n)),
        Token::Bool(b) => Ok(JsonValue::Bool(b)),
        Token::Null => Ok(JsonValue::Null),
        other => Err(Error::unexpected_token(
            TokenKind::String,
            other.kind(),
            cursor.line(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::JsonCursor;

    fn build(input: &str) -> JsonValue {
        let mut cursor = JsonCursor::new(input);
        cursor.advance().unwrap();
        build_value(&mut cursor).unwrap()
    }

    #[test]
    fn test_build_scalars() {
        assert_eq!(build("\"x\""), JsonValue::from("x"));
        assert_eq!(build("12"), JsonValue::from(12));
        assert_eq!(build("true"), JsonValue::Bool(true));
        assert_eq!(build("null"), JsonValue::Null);
    }

    #[test]
    fn test_build_nested() {
        let value = build(r#"["a", [1, null], {"b": "c"}]"#);
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_str(), Some("a"));
        assert_eq!(items[1].as_array().unwrap()[1], JsonValue::Null);
        assert_eq!(
            items[2].as_object().unwrap().get("b").unwrap().as_str(),
            Some("c")
        );
    }

    #[test]
    fn test_object_preserves_field_order() {
        let value = build(r#"{"z": 1, "a": 2, "m": 3}"#);
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_cursor_rests_on_closing_token() {
        let mut cursor = JsonCursor::new(r#"[[1], "tail"]"#);
        cursor.advance().unwrap(); // outer [
        cursor.advance().unwrap(); // inner [
        build_value(&mut cursor).unwrap();
        assert_eq!(
            cursor.advance().unwrap(),
            Token::String("tail".to_string())
        );
    }

    #[test]
    fn test_display_round_trips_through_serde_json() {
        let value = build(r#"{"a": ["x", 1, true, null], "b": -2.5}"#);
        let text = value.to_string();
        let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed["a"][0], "x");
        assert_eq!(reparsed["b"], -2.5);
    }

    #[test]
    fn test_serde_deserialize_from_json() {
        let value: JsonValue = serde_json::from_str(r#"{"n": [1, "two"]}"#).unwrap();
        let fields = value.as_object().unwrap();
        assert_eq!(fields["n"].as_array().unwrap()[1].as_str(), Some("two"));
    }
}
