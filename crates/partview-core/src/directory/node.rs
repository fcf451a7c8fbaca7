//! Decoding of the nested directory mapping.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::directory::record::FileRecord;
use crate::error::{CoreError, CoreResult};
use crate::kinds::LeafGroupKind;

/// One value inside a [`DirectoryNode`], classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryEntry {
    /// A nested mapping.
    Branch(DirectoryNode),
    /// A recognised leaf-group key holding file records.
    LeafGroup {
        kind: LeafGroupKind,
        records: Vec<FileRecord>,
    },
    /// Anything else: scalars, nulls, unrecognised arrays.
    Label(Value),
}

/// A mapping from keys to entries, in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryNode {
    entries: Vec<(String, DirectoryEntry)>,
}

impl DirectoryNode {
    /// Decodes the backend's JSON body.
    ///
    /// Only the root is checked: it must be a JSON object. Below the root
    /// every value is classified, and shapes that fit neither a branch nor
    /// a leaf-group degrade to [`DirectoryEntry::Label`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedDirectory`] if `value` is not an object.
    pub fn decode(value: Value) -> CoreResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(CoreError::MalformedDirectory(format!(
                "expected an object at the root, found {}",
                json_kind(&other)
            ))),
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, value)| {
                let entry = classify(&key, value);
                (key, entry)
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, DirectoryEntry)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&DirectoryEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    /// Counts every file record in this node and all nested branches.
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, entry)| match entry {
                DirectoryEntry::Branch(child) => child.file_count(),
                DirectoryEntry::LeafGroup { records, .. } => records.len(),
                DirectoryEntry::Label(_) => 0,
            })
            .sum()
    }
}

impl<'de> Deserialize<'de> for DirectoryNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::decode(value).map_err(serde::de::Error::custom)
    }
}

fn classify(key: &str, value: Value) -> DirectoryEntry {
    match (LeafGroupKind::from_key(key), value) {
        (Some(kind), Value::Array(items)) => DirectoryEntry::LeafGroup {
            kind,
            records: decode_records(key, items),
        },
        (_, Value::Object(map)) => DirectoryEntry::Branch(DirectoryNode::from_map(map)),
        (_, other) => DirectoryEntry::Label(other),
    }
}

/// Decodes the records of a leaf-group, skipping elements that are not records.
fn decode_records(key: &str, items: Vec<Value>) -> Vec<FileRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, item)| match serde_json::from_value::<FileRecord>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(group = key, index, "skipping malformed file record: {e}");
                    None
                }
            },
        )
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(node: &DirectoryNode) -> Vec<&str> {
        node.entries().iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn decodes_customer_scenario() {
        let node = DirectoryNode::decode(json!({
            "CustomerA": {
                "Form": [{"uuid": "u1", "name": "quote.pdf", "location": "/a/quote.pdf"}]
            }
        }))
        .unwrap();

        let Some(DirectoryEntry::Branch(customer)) = node.get("CustomerA") else {
            panic!("CustomerA should be a branch");
        };
        let Some(DirectoryEntry::LeafGroup { kind, records }) = customer.get("Form") else {
            panic!("Form should be a leaf-group");
        };
        assert_eq!(*kind, LeafGroupKind::Form);
        assert_eq!(records, &vec![FileRecord::new("u1", "quote.pdf", "/a/quote.pdf")]);
    }

    #[test]
    fn preserves_insertion_order() {
        let node: DirectoryNode = serde_json::from_str(
            r#"{"zeta": {}, "alpha": {}, "Mid": 3, "beta": {"y": 1, "x": 2}}"#,
        )
        .unwrap();
        assert_eq!(keys(&node), vec!["zeta", "alpha", "Mid", "beta"]);

        let Some(DirectoryEntry::Branch(beta)) = node.get("beta") else {
            panic!("beta should be a branch");
        };
        assert_eq!(keys(beta), vec!["y", "x"]);
    }

    #[test]
    fn scalars_and_nulls_become_labels() {
        let node = DirectoryNode::decode(json!({
            "count": 3,
            "CAD": null,
            "note": "hello",
        }))
        .unwrap();
        assert_eq!(node.get("count"), Some(&DirectoryEntry::Label(json!(3))));
        assert_eq!(node.get("CAD"), Some(&DirectoryEntry::Label(Value::Null)));
        assert_eq!(node.get("note"), Some(&DirectoryEntry::Label(json!("hello"))));
    }

    #[test]
    fn unrecognised_array_becomes_label() {
        let node = DirectoryNode::decode(json!({
            "Photos": [{"uuid": "u1", "name": "a.png", "location": "a.png"}]
        }))
        .unwrap();
        assert!(matches!(node.get("Photos"), Some(DirectoryEntry::Label(_))));
    }

    #[test]
    fn recognised_key_with_object_value_is_a_branch() {
        let node = DirectoryNode::decode(json!({ "Scan": { "Inner": {} } })).unwrap();
        assert!(matches!(node.get("Scan"), Some(DirectoryEntry::Branch(_))));
    }

    #[test]
    fn empty_mapping_and_empty_group() {
        let node = DirectoryNode::decode(json!({ "Empty": {}, "Scan": [] })).unwrap();
        assert_eq!(
            node.get("Empty"),
            Some(&DirectoryEntry::Branch(DirectoryNode::default()))
        );
        assert_eq!(
            node.get("Scan"),
            Some(&DirectoryEntry::LeafGroup {
                kind: LeafGroupKind::Scan,
                records: Vec::new(),
            })
        );
    }

    #[test]
    fn malformed_records_are_skipped() {
        let node = DirectoryNode::decode(json!({
            "Form": [
                {"uuid": "u1", "name": "a.txt", "location": "a.txt"},
                "not a record",
                {"uuid": "u2"},
                {"uuid": "u3", "name": "c.txt", "location": "c.txt"}
            ]
        }))
        .unwrap();
        let Some(DirectoryEntry::LeafGroup { records, .. }) = node.get("Form") else {
            panic!("Form should be a leaf-group");
        };
        let uuids: Vec<&str> = records.iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["u1", "u3"]);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = DirectoryNode::decode(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, CoreError::MalformedDirectory(_)));
        assert!(err.to_string().contains("an array"));

        let result: Result<DirectoryNode, _> = serde_json::from_str("\"text\"");
        assert!(result.is_err());
    }

    #[test]
    fn file_count_is_recursive() {
        let node = DirectoryNode::decode(json!({
            "A": {
                "CAD": [{"uuid": "c1", "name": "p.step", "location": "p.step"}],
                "Trials": {
                    "Form": [
                        {"uuid": "f1", "name": "a.csv", "location": "a.csv"},
                        {"uuid": "f2", "name": "b.csv", "location": "b.csv"}
                    ]
                }
            },
            "B": 7
        }))
        .unwrap();
        assert_eq!(node.file_count(), 3);
        assert_eq!(node.len(), 2);
        assert!(!node.is_empty());
    }
}
