//! The recursive value type carried by request data.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Serialize;

use crate::sanitizer::encoding::discard_invalid_utf8;

/// A request value: text, an ordered list, or an ordered string-keyed map.
///
/// Maps keep insertion order so that cleaned output lists fields in the order
/// they arrived.
///
/// # Examples
///
/// ```
/// use request_hygiene::InputValue;
///
/// let value: InputValue = serde_json::from_str(r#"{"tags": ["a", "b"], "page": 2}"#).unwrap();
///
/// assert_eq!(value.get("page").and_then(InputValue::as_str), Some("2"));
/// assert_eq!(value.get("tags").map(InputValue::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InputValue {
    /// A string leaf
    Text(String),
    /// Positional values, e.g. `tags[]=a&tags[]=b`
    List(Vec<InputValue>),
    /// Keyed values, e.g. `user[name]=alice`
    Map(IndexMap<String, InputValue>),
}

impl InputValue {
    /// Builds a text value from raw bytes, silently dropping invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        InputValue::Text(discard_invalid_utf8(bytes))
    }

    /// Creates an empty map value.
    pub fn map() -> Self {
        InputValue::Map(IndexMap::new())
    }

    /// Returns the text if this is a leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InputValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes the value, returning the text if this is a leaf.
    pub fn into_text(self) -> Option<String> {
        match self {
            InputValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a child by key.
    ///
    /// Maps are searched by key; lists accept a decimal index.
    pub fn get(&self, key: &str) -> Option<&InputValue> {
        match self {
            InputValue::Map(map) => map.get(key),
            InputValue::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            InputValue::Text(_) => None,
        }
    }

    /// Inserts a child into a map value. Non-map values are left unchanged.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        if let InputValue::Map(map) = self {
            map.insert(key.into(), value.into());
        }
    }

    /// Number of direct children; text leaves count their bytes.
    pub fn len(&self) -> usize {
        match self {
            InputValue::Text(s) => s.len(),
            InputValue::List(items) => items.len(),
            InputValue::Map(map) => map.len(),
        }
    }

    /// Returns `true` for empty text, lists and maps.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps every text leaf through `f`, keeping the shape and the keys.
    pub(crate) fn map_leaves(self, f: &mut impl FnMut(String) -> String) -> Self {
        match self {
            InputValue::Text(s) => InputValue::Text(f(s)),
            InputValue::List(items) => {
                InputValue::List(items.into_iter().map(|v| v.map_leaves(f)).collect())
            }
            InputValue::Map(map) => InputValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, v.map_leaves(f)))
                    .collect(),
            ),
        }
    }
}

impl Default for InputValue {
    fn default() -> Self {
        InputValue::Text(String::new())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl<V: Into<InputValue>> From<Vec<V>> for InputValue {
    fn from(items: Vec<V>) -> Self {
        InputValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<InputValue>> FromIterator<(K, V)> for InputValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        InputValue::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// Scalars from JSON bodies arrive as text, the way form fields do.
impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(InputValueVisitor)
    }
}

struct InputValueVisitor;

impl<'de> Visitor<'de> for InputValueVisitor {
    type Value = InputValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean, null, sequence or map")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(InputValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(InputValue::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(InputValue::from_bytes(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(InputValue::Text(if v { "1" } else { "" }.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(InputValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(InputValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(InputValue::Text(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(InputValue::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(InputValue::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        InputValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(InputValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, InputValue>()? {
            map.insert(key, value);
        }
        Ok(InputValue::Map(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_scalars_as_text() {
        let value: InputValue =
            serde_json::from_str(r#"{"n": 5, "f": false, "t": true, "z": null}"#).unwrap();

        assert_eq!(value.get("n").and_then(InputValue::as_str), Some("5"));
        assert_eq!(value.get("f").and_then(InputValue::as_str), Some(""));
        assert_eq!(value.get("t").and_then(InputValue::as_str), Some("1"));
        assert_eq!(value.get("z").and_then(InputValue::as_str), Some(""));
    }

    #[test]
    fn map_preserves_insertion_order() {
        let value: InputValue = serde_json::from_str(r#"{"b": "1", "a": "2", "c": "3"}"#).unwrap();

        let InputValue::Map(map) = value else {
            panic!("expected map");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn list_get_by_index() {
        let value = InputValue::from(vec!["x", "y"]);

        assert_eq!(value.get("1").and_then(InputValue::as_str), Some("y"));
        assert_eq!(value.get("2"), None);
        assert_eq!(value.get("name"), None);
    }

    #[test]
    fn serializes_untagged() {
        let value: InputValue = [("user", InputValue::from(vec!["a"]))].into_iter().collect();

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"user":["a"]}"#);
    }

    #[test]
    fn from_bytes_drops_invalid_sequences() {
        let value = InputValue::from_bytes(b"caf\xc3\xa9 \xff\xfeok");

        assert_eq!(value.as_str(), Some("café ok"));
    }

    #[test]
    fn map_leaves_keeps_keys() {
        let value: InputValue = [("Key", "value")].into_iter().collect();
        let upper = value.map_leaves(&mut |s| s.to_uppercase());

        assert_eq!(upper.get("Key").and_then(InputValue::as_str), Some("VALUE"));
    }
}
