//! Structured document

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Result, SettingsError};

/// In-memory settings document: a JSON object of key to value node.
///
/// The root is always an object. Parsing text whose root is anything else
/// fails with [`SettingsError::ParseError`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Map<String, Value>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text
    pub fn parse(text: &str) -> Result<Self> {
        let entries: Map<String, Value> =
            serde_json::from_str(text).map_err(SettingsError::ParseError)?;
        Ok(Self { entries })
    }

    /// Serialize with indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).map_err(SettingsError::SerializeError)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert or overwrite the node at `key`
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

/// Convert a caller value into a document node
pub fn to_node<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(SettingsError::SerializeError)
}

/// Convert a document node into the caller's target type
pub fn from_node<T: DeserializeOwned>(key: &str, node: &Value) -> Result<T> {
    T::deserialize(node).map_err(|source| SettingsError::Conversion {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object() {
        let doc = Document::parse(r#"{"isTest": true, "name": "demo"}"#).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("isTest"), Some(&json!(true)));
        assert!(doc.contains_key("name"));
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let err = Document::parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        let err = Document::parse("{\"a\": ").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }

    #[test]
    fn test_set_overwrites() {
        let mut doc = Document::new();
        doc.set("count", json!(1));
        doc.set("count", json!(2));
        assert_eq!(doc.get("count"), Some(&json!(2)));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_pretty_string_is_indented() {
        let mut doc = Document::new();
        doc.set("isTest", json!(true));
        let text = doc.to_pretty_string().unwrap();
        assert_eq!(text, "{\n  \"isTest\": true\n}");
    }

    #[test]
    fn test_from_node_conversion_error_names_key() {
        let err = from_node::<u32>("port", &json!("eighty")).unwrap_err();
        match err {
            SettingsError::Conversion { key, .. } => assert_eq!(key, "port"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_node_conversions() {
        let node = to_node(vec![1u8, 2, 3]).unwrap();
        let back: Vec<u8> = from_node("list", &node).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }
}
