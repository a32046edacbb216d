use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::PartitionSpec;

/// Contents of one `index.json`: evidence name -> record.
///
/// Records other than the one being pruned are carried through untouched,
/// so the map holds raw JSON. `serde_json::Map` keeps its keys sorted.
pub type DirectoryIndex = serde_json::Map<String, Value>;

/// Tombstone group name -> removal records, oldest first
pub type Tombstones = BTreeMap<String, Vec<TombstoneEntry>>;

/// Metadata kept in the directory index for a piece of evidence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    /// Time to live in seconds. Kept as raw JSON, only staleness checks read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_root: Option<String>,
    /// Partition key -> the field values that make up that key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions: Option<BTreeMap<String, Vec<Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pruned_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tombstones: Option<Tombstones>,
}

impl IndexRecord {
    pub fn is_partitioned(&self) -> bool {
        self.partition_fields.is_some() || self.partitions.is_some()
    }

    /// A pruned record has tombstones and nothing describing live evidence
    pub fn is_pruned(&self) -> bool {
        self.tombstones.is_some() && self.last_update.is_none()
    }

    pub fn partition_spec(&self) -> Option<PartitionSpec> {
        if !self.is_partitioned() {
            return None;
        }
        Some(PartitionSpec {
            fields: self.partition_fields.clone().unwrap_or_default(),
            root: self.partition_root.clone(),
        })
    }

    /// Time to live in whole seconds, when `ttl` is a number
    pub fn ttl_seconds(&self) -> Option<i64> {
        match self.ttl.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    /// Partition keys in index order
    pub fn partition_keys(&self) -> Vec<String> {
        self.partitions
            .as_ref()
            .map(|partitions| partitions.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Partition details carried on a tombstone for partitioned evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionTombstone {
    pub partition_fields: Vec<String>,
    pub partition_root: Option<String>,
    pub partition_key: Vec<Value>,
}

/// One removal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TombstoneEntry {
    /// End of life, the commit date of the session that removed the evidence
    pub eol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    pub reason: String,
    #[serde(flatten)]
    pub partition: Option<PartitionTombstone>,
}

/// Replaces an [`IndexRecord`] once its evidence has been removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrunedIndexRecord {
    pub description: String,
    pub pruned_by: String,
    pub tombstones: Tombstones,
}
