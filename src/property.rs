//! The canonical property record recovered from a jCard stream.
//!
//! Whatever dialect the producer wrote, every property ends up as one
//! [`Property`]: a lowercased name, an optional group, an ordered parameter
//! multimap, an optional data type, and the raw value trees.

use serde::Serialize;
use std::fmt;

use crate::parameters::Parameters;
use crate::value::JsonValue;

/// A jCard data type label such as `text`, `uri`, or `date-time`.
///
/// Names are lowercased on construction. The jCard sentinel `"unknown"` is
/// never stored as a `DataType`; the reader maps it to `None` instead.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::DataType;
///
/// assert_eq!(DataType::get("TEXT"), DataType::text());
/// assert_eq!(DataType::uri().as_str(), "uri");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DataType(String);

impl DataType {
    /// Returns the data type with the given name, lowercased.
    #[must_use]
    pub fn get(name: &str) -> Self {
        DataType(name.to_ascii_lowercase())
    }

    /// The type name as written in the jCard, always lowercase.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `text` data type.
    #[must_use]
    pub fn text() -> Self {
        DataType("text".to_string())
    }

    /// The `uri` data type.
    #[must_use]
    pub fn uri() -> Self {
        DataType("uri".to_string())
    }

    /// The `date` data type.
    #[must_use]
    pub fn date() -> Self {
        DataType("date".to_string())
    }

    /// The `time` data type.
    #[must_use]
    pub fn time() -> Self {
        DataType("time".to_string())
    }

    /// The `date-time` data type.
    #[must_use]
    pub fn date_time() -> Self {
        DataType("date-time".to_string())
    }

    /// The `date-and-or-time` data type.
    #[must_use]
    pub fn date_and_or_time() -> Self {
        DataType("date-and-or-time".to_string())
    }

    /// The `timestamp` data type.
    #[must_use]
    pub fn timestamp() -> Self {
        DataType("timestamp".to_string())
    }

    /// The `boolean` data type.
    #[must_use]
    pub fn boolean() -> Self {
        DataType("boolean".to_string())
    }

    /// The `integer` data type.
    #[must_use]
    pub fn integer() -> Self {
        DataType("integer".to_string())
    }

    /// The `float` data type.
    #[must_use]
    pub fn float() -> Self {
        DataType("float".to_string())
    }

    /// The `utc-offset` data type.
    #[must_use]
    pub fn utc_offset() -> Self {
        DataType("utc-offset".to_string())
    }

    /// The `language-tag` data type.
    #[must_use]
    pub fn language_tag() -> Self {
        DataType("language-tag".to_string())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single parsed jCard property.
///
/// The `group` field is extracted from the `group` pseudo-parameter when
/// present; it never remains inside `parameters`. A `data_type` of `None`
/// means the producer either wrote `"unknown"` or omitted the type slot
/// entirely.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::{events_from_str, DataType, Event};
///
/// let json = r#"["vcard", [["fn", {}, "text", "Ada Lovelace"]]]"#;
/// let events: Vec<Event> = events_from_str(json)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// match &events[1] {
///     Event::Property(property) => {
///         assert_eq!(property.name, "fn");
///         assert_eq!(property.data_type, Some(DataType::text()));
///         assert_eq!(property.value[0].as_str(), Some("Ada Lovelace"));
///     }
///     other => panic!("expected a property, got {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// The property group, if the `group` pseudo-parameter was present.
    pub group: Option<String>,
    /// The property name, lowercased.
    pub name: String,
    /// The property parameters, minus any `group` pseudo-parameter.
    pub parameters: Parameters,
    /// The declared data type, or `None` for `"unknown"` or an omitted slot.
    pub data_type: Option<DataType>,
    /// The property values as raw JSON trees. Usually one element;
    /// multi-valued properties such as structured names carry more.
    pub value: Vec<JsonValue>,
}

impl Property {
    /// Creates a property with the given name and no parameters, type, or
    /// values.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Property {
            group: None,
            name: name.to_ascii_lowercase(),
            parameters: Parameters::new(),
            data_type: None,
            value: Vec::new(),
        }
    }

    /// Returns the first value as a string, if it is one.
    #[must_use]
    pub fn value_as_str(&self) -> Option<&str> {
        self.value.first().and_then(JsonValue::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_lowercases() {
        assert_eq!(DataType::get("DATE-TIME"), DataType::date_time());
        assert_eq!(DataType::get("Text").as_str(), "text");
    }

    #[test]
    fn test_property_name_lowercases() {
        let property = Property::new("FN");
        assert_eq!(property.name, "fn");
        assert!(property.parameters.is_empty());
        assert!(property.value.is_empty());
    }

    #[test]
    fn test_value_as_str() {
        let mut property = Property::new("fn");
        assert_eq!(property.value_as_str(), None);
        property.value.push(JsonValue::from("Ada"));
        assert_eq!(property.value_as_str(), Some("Ada"));
    }
}
