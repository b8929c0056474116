//! Validation report types
//!
//! The report maps concrete attribute paths to the messages of every rule
//! that failed there, in rule-declaration order. Paths keep the order in
//! which they were first reported.
//!
//! Copyright (c) 2025 Portafilter Team
//! Licensed under the Apache-2.0 license

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Path-keyed collection of violation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record messages for a path, appending to any already recorded
    pub fn insert(&mut self, path: impl Into<String>, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }

        let path = path.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == path) {
            Some((_, existing)) => existing.extend(messages),
            None => self.entries.push((path, messages)),
        }
    }

    /// Merge another report, prefixing each of its paths
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for (path, messages) in other.entries {
            self.insert(format!("{}.{}", prefix, path), messages);
        }
    }

    /// Messages recorded for a path
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == path)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Number of paths with violations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Total number of messages across all paths
    pub fn message_count(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Vec<String>)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut report = ValidationErrors::new();
        for (path, messages) in iter {
            report.insert(path, messages);
        }
        report
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, messages) in &self.entries {
            map.serialize_entry(path, messages)?;
        }
        map.end()
    }
}

struct ReportVisitor;

impl<'de> Visitor<'de> for ReportVisitor {
    type Value = ValidationErrors;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of attribute paths to message lists")
    }

    // Entries arrive in document order
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut report = ValidationErrors::new();
        while let Some((path, messages)) = access.next_entry::<String, Vec<String>>()? {
            report.insert(path, messages);
        }
        Ok(report)
    }
}

impl<'de> Deserialize<'de> for ValidationErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReportVisitor)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.message_count();
        write!(
            f,
            "{} violation{} in {} field{}",
            count,
            if count == 1 { "" } else { "s" },
            self.len(),
            if self.len() == 1 { "" } else { "s" }
        )
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_appends_and_keeps_order() {
        let mut report = ValidationErrors::new();
        report.insert("name", vec!["first".to_string()]);
        report.insert("age", vec!["second".to_string()]);
        report.insert("name", vec!["third".to_string()]);
        report.insert("ignored", vec![]);

        assert_eq!(report.paths().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(report.get("name").unwrap(), ["first", "third"]);
        assert_eq!(report.message_count(), 3);
        assert!(!report.contains("ignored"));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut report = ValidationErrors::new();
        report.insert("zeta", vec!["z".to_string()]);
        report.insert("alpha", vec!["a".to_string()]);

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"zeta":["z"],"alpha":["a"]}"#);
    }

    #[test]
    fn test_deserialize_keeps_path_order() {
        let report: ValidationErrors =
            serde_json::from_str(r#"{"z": ["last"], "a": ["first", "second"]}"#).unwrap();
        assert_eq!(report.paths().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(report.get("a").unwrap(), ["first", "second"]);

        let back: ValidationErrors = serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();
        assert_eq!(back, report);

        assert!(serde_json::from_str::<ValidationErrors>("[]").is_err());
    }

    #[test]
    fn test_merge_prefixed() {
        let mut nested = ValidationErrors::new();
        nested.insert("street", vec!["The street field is required.".to_string()]);

        let mut report = ValidationErrors::new();
        report.merge_prefixed("address", nested);
        assert!(report.contains("address.street"));
    }

    #[test]
    fn test_display_summary() {
        let mut report = ValidationErrors::new();
        report.insert("a", vec!["x".to_string(), "y".to_string()]);
        assert_eq!(report.to_string(), "2 violations in 1 field");
    }
}
