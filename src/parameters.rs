//! Ordered multimap for property parameters.
//!
//! jCard parameters are case-insensitive names mapping to one or more string
//! values; a name may be repeated and a single name may carry a value array.
//! [`Parameters`] flattens both cases into one ordered multimap built on
//! [`IndexMap`], so parameters come back out in the order the producer wrote
//! them.
//!
//! Names are normalized to lowercase on every operation, matching the
//! case-insensitive semantics of the vCard parameter registry.
//!
//! ## Examples
//!
//! ```rust
//! use jcard_stream::Parameters;
//!
//! let mut parameters = Parameters::new();
//! parameters.put("TYPE", "work");
//! parameters.put("type", "voice");
//!
//! assert_eq!(parameters.get("Type"), &["work", "voice"]);
//! ```

use indexmap::IndexMap;

/// An ordered, case-insensitive multimap of parameter names to values.
///
/// # Examples
///
/// ```rust
/// use jcard_stream::Parameters;
///
/// let mut parameters = Parameters::new();
/// parameters.put("group", "item1");
/// parameters.put("type", "home");
///
/// // The group pseudo-parameter is typically extracted and removed:
/// let groups = parameters.remove_all("group");
/// assert_eq!(groups, vec!["item1"]);
/// assert_eq!(parameters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters(IndexMap<String, Vec<String>>);

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Parameters(IndexMap::new())
    }

    /// Appends a value under the given name.
    ///
    /// The name is lowercased; repeated puts under one name accumulate in
    /// insertion order.
    pub fn put(&mut self, name: &str, value: impl Into<String>) {
        self.0
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Returns all values for a name, in insertion order. Empty if the name
    /// is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.0
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the first value for a name, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jcard_stream::Parameters;
    ///
    /// let mut parameters = Parameters::new();
    /// parameters.put("pref", "1");
    /// assert_eq!(parameters.first("PREF"), Some("1"));
    /// assert_eq!(parameters.first("tz"), None);
    /// ```
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }

    /// Removes a name and returns all of its values, preserving the order of
    /// the remaining names.
    #[must_use]
    pub fn remove_all(&mut self, name: &str) -> Vec<String> {
        self.0
            .shift_remove(&name.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterates over parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut parameters = Parameters::new();
        for (name, value) in iter {
            parameters.put(&name, value);
        }
        parameters
    }
}

impl serde::Serialize for Parameters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, values) in &self.0 {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
