//! Allowlist projection of ARB records.
//!
//! Each pipeline owns one [`Allowlist`]. Filtering keeps only allowlisted keys,
//! in allowlist order. Allowlisted keys missing from a record are left out of
//! the result without error: partially translated bundles still produce an
//! artifact with whatever they contain.

use serde_json::{Map, Value};

use crate::{
    error::Error,
    formats::arb::{ArbRecord, METADATA_MARKER},
};

/// Accessibility strings copied into Android `strings.xml` resources.
pub const ACCESSIBILITY_KEYS: [&str; 8] = [
    "accessibility_service_label",
    "accessibility_service_description",
    "accessibility_permission_title",
    "accessibility_permission_message",
    "accessibility_permission_benefits",
    "accessibility_permission_how_to",
    "btn_enable_accessibility",
    "btn_cancel",
];

/// Keys the Android runtime reads from the JSON assets.
pub const RUNTIME_CONFIG_KEYS: [&str; 2] = ["translation_mode", "original_text_mode"];

/// An ordered set of keys a pipeline is allowed to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowlist {
    keys: Vec<String>,
    metadata_marker: Option<char>,
}

impl Allowlist {
    /// Builds an allowlist from `keys`, keeping the first occurrence of duplicates.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        Self {
            keys: unique,
            metadata_marker: None,
        }
    }

    /// Never emit keys starting with `marker`, even when they are allowlisted.
    pub fn with_metadata_marker(mut self, marker: char) -> Self {
        self.metadata_marker = Some(marker);
        self
    }

    /// The accessibility strings allowlist used for Android resources.
    pub fn accessibility_strings() -> Self {
        Self::new(ACCESSIBILITY_KEYS)
    }

    /// The runtime configuration allowlist used for JSON assets.
    pub fn runtime_config() -> Self {
        Self::new(RUNTIME_CONFIG_KEYS).with_metadata_marker(METADATA_MARKER)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn metadata_marker(&self) -> Option<char> {
        self.metadata_marker
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether `key` may appear in this allowlist's output.
    pub fn permits(&self, key: &str) -> bool {
        if let Some(marker) = self.metadata_marker {
            if key.starts_with(marker) {
                return false;
            }
        }
        self.keys.iter().any(|k| k == key)
    }

    /// Projects `record` onto the allowlist.
    pub fn filter(&self, record: &ArbRecord) -> FilteredRecord {
        self.project(|key| record.get(key))
    }

    /// Filters an already filtered record again. The result equals the input
    /// whenever both were produced by the same allowlist.
    pub fn refilter(&self, filtered: &FilteredRecord) -> FilteredRecord {
        self.project(|key| filtered.get(key))
    }

    fn project<'a, F>(&self, lookup: F) -> FilteredRecord
    where
        F: Fn(&str) -> Option<&'a Value>,
    {
        self.keys
            .iter()
            .filter(|key| self.permits(key))
            .filter_map(|key| lookup(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }
}

/// The ordered result of applying an [`Allowlist`] to a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredRecord {
    entries: Vec<(String, Value)>,
}

impl FilteredRecord {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every entry as text, failing on the first non-string value.
    /// A JSON `null` reads as empty text.
    pub fn string_entries(&self) -> Result<Vec<(&str, &str)>, Error> {
        self.entries
            .iter()
            .map(|(key, value)| match value {
                Value::String(text) => Ok((key.as_str(), text.as_str())),
                Value::Null => Ok((key.as_str(), "")),
                other => Err(Error::DataMismatch(format!(
                    "value of `{}` must be a string, found `{}`",
                    key, other
                ))),
            })
            .collect()
    }

    /// Converts into a JSON object, keeping entry order.
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.entries.iter().cloned().collect()
    }
}

impl FromIterator<(String, Value)> for FilteredRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use serde_json::json;

    fn record(json: &str) -> ArbRecord {
        ArbRecord::from_str(json).unwrap()
    }

    #[test]
    fn test_accessibility_allowlist_has_eight_keys() {
        let allowlist = Allowlist::accessibility_strings();
        assert_eq!(allowlist.keys().len(), 8);
        assert_eq!(allowlist.keys()[0], "accessibility_service_label");
        assert_eq!(allowlist.keys()[7], "btn_cancel");
        assert_eq!(allowlist.metadata_marker(), None);
    }

    #[test]
    fn test_runtime_allowlist_has_two_keys() {
        let allowlist = Allowlist::runtime_config();
        assert_eq!(allowlist.keys(), ["translation_mode", "original_text_mode"]);
        assert_eq!(allowlist.metadata_marker(), Some('@'));
    }

    #[test]
    fn test_filter_keeps_allowlist_order() {
        let source = record(
            r#"{
                "btn_cancel": "Cancel",
                "unrelated_key": "x",
                "accessibility_permission_title": "Permission",
                "accessibility_service_label": "Service"
            }"#,
        );
        let filtered = Allowlist::accessibility_strings().filter(&source);
        let keys: Vec<&str> = filtered.keys().collect();
        assert_eq!(
            keys,
            [
                "accessibility_service_label",
                "accessibility_permission_title",
                "btn_cancel"
            ]
        );
    }

    #[test]
    fn test_missing_keys_are_omitted() {
        let filtered = Allowlist::accessibility_strings().filter(&record(r#"{"other": "x"}"#));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_metadata_marked_keys_never_emitted() {
        let allowlist = Allowlist::new(["@@locale", "translation_mode"]).with_metadata_marker('@');
        let filtered = allowlist.filter(&record(
            r#"{"@@locale": "en", "translation_mode": "auto"}"#,
        ));
        assert_eq!(filtered.keys().collect::<Vec<_>>(), ["translation_mode"]);
        assert!(!allowlist.permits("@@locale"));
    }

    #[test]
    fn test_without_marker_metadata_key_can_be_allowlisted() {
        let allowlist = Allowlist::new(["@@locale"]);
        let filtered = allowlist.filter(&record(r#"{"@@locale": "en"}"#));
        assert_eq!(filtered.get("@@locale"), Some(&json!("en")));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let allowlist = Allowlist::runtime_config();
        let once = allowlist.filter(&record(
            r#"{"@@locale": "en", "translation_mode": "auto", "original_text_mode": "off", "other": "y"}"#,
        ));
        assert_eq!(allowlist.refilter(&once), once);
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let source = record(r#"{"translation_mode": "auto", "other": "y"}"#);
        let before = source.clone();
        let _ = Allowlist::runtime_config().filter(&source);
        assert_eq!(source, before);
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let allowlist = Allowlist::new(["a", "b", "a"]);
        assert_eq!(allowlist.keys(), ["a", "b"]);
    }

    #[test]
    fn test_string_entries_rejects_non_string() {
        let filtered = Allowlist::new(["a", "b"]).filter(&record(r#"{"a": "A", "b": 2}"#));
        let err = filtered.string_entries().unwrap_err();
        assert!(matches!(err, Error::DataMismatch(_)));
        assert!(err.to_string().contains("`b`"));
    }

    #[test]
    fn test_string_entries_null_is_empty() {
        let filtered = Allowlist::new(["a", "b"]).filter(&record(r#"{"a": null, "b": "B"}"#));
        assert_eq!(filtered.string_entries().unwrap(), [("a", ""), ("b", "B")]);
    }

    #[test]
    fn test_to_json_map_keeps_allowlist_order() {
        let filtered = Allowlist::runtime_config().filter(&record(
            r#"{"original_text_mode": "off", "translation_mode": "auto"}"#,
        ));
        let keys: Vec<String> = filtered.to_json_map().keys().cloned().collect();
        assert_eq!(keys, ["translation_mode", "original_text_mode"]);
    }

    #[test]
    fn test_to_json_map() {
        let filtered = Allowlist::runtime_config().filter(&record(
            r#"{"translation_mode": "auto", "original_text_mode": "off"}"#,
        ));
        assert_eq!(
            Value::Object(filtered.to_json_map()),
            json!({"translation_mode": "auto", "original_text_mode": "off"})
        );
    }
}
