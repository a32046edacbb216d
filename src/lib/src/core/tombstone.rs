//! # Tombstones
//!
//! Removing evidence from the locker never removes its history. The files go
//! away, but the evidence's record in the directory index is replaced with a
//! [`PrunedIndexRecord`] holding one tombstone per removed file: when it was
//! removed (`eol`), when it was last updated, and why it was removed.
//!
//! Unpartitioned evidence gets a single tombstone keyed by the evidence
//! name. Partitioned evidence gets one tombstone per partition, keyed by the
//! partition key.

use std::path::PathBuf;

use crate::core::evidence_store::EvidenceStore;
use crate::core::index;
use crate::core::lock;
use crate::core::repository::Repository;
use crate::error::PruneError;
use crate::model::{
    EvidenceRef, IndexRecord, PartitionTombstone, PruneLog, PrunedIndexRecord, TombstoneEntry,
    Tombstones,
};

/// What has to leave the working copy for one piece of evidence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The evidence file itself
    Unpartitioned(PathBuf),
    /// Every partition listed in the index record
    Partitioned(Vec<String>),
}

impl Removal {
    pub fn for_evidence(
        evidence: &EvidenceRef,
        record: &IndexRecord,
        repo: &impl Repository,
    ) -> Removal {
        if evidence.is_partitioned() {
            Removal::Partitioned(record.partition_keys())
        } else {
            Removal::Unpartitioned(repo.path().join(evidence.path()))
        }
    }
}

/// Removes evidence and records tombstones for it.
///
/// Every tombstone written by one recorder shares the same `eol`.
pub struct TombstoneRecorder<'a, R: Repository, S: EvidenceStore> {
    repo: &'a R,
    store: &'a S,
    eol: &'a str,
}

impl<'a, R: Repository, S: EvidenceStore> TombstoneRecorder<'a, R, S> {
    pub fn new(repo: &'a R, store: &'a S, eol: &'a str) -> TombstoneRecorder<'a, R, S> {
        TombstoneRecorder { repo, store, eol }
    }

    /// Remove the evidence file(s), replace the evidence's index record with
    /// a pruned record, stage the index, and log the evidence path.
    ///
    /// The pruned record overwrites whatever was indexed under the evidence
    /// name, including tombstones from an earlier prune of the same name.
    pub fn remove_evidence(
        &self,
        evidence: &EvidenceRef,
        reason: &str,
        pruned_by: &str,
        log: &mut PruneLog,
    ) -> Result<(), PruneError> {
        let index_path = index::index_path(self.repo.path(), &evidence.directory);

        lock::with_index_lock(&index_path, || {
            let mut directory_index = index::read_index(&index_path)?;
            let record = index::get_record(&directory_index, &index_path, &evidence.name)?
                .unwrap_or_default();

            let tombstones = match Removal::for_evidence(evidence, &record, self.repo) {
                Removal::Partitioned(partition_keys) => {
                    self.store.remove_partitions(evidence, &partition_keys)?;
                    self.partition_tombstones(evidence, &record, &partition_keys, reason)
                }
                Removal::Unpartitioned(path) => {
                    self.repo.stage_removal(&[path])?;
                    let mut tombstones = Tombstones::new();
                    tombstones.insert(evidence.name.clone(), vec![self.tombstone(&record, reason)]);
                    tombstones
                }
            };
            log.push(evidence.path());

            let pruned = PrunedIndexRecord {
                description: evidence.description.clone(),
                pruned_by: pruned_by.to_string(),
                tombstones,
            };
            directory_index.insert(evidence.name.clone(), serde_json::to_value(&pruned)?);
            index::write_index(&index_path, &directory_index)?;

            self.repo.stage_add(&[index_path.clone()])
        })?;

        log::info!("pruned {} by {pruned_by}: {reason}", evidence.path());
        Ok(())
    }

    fn tombstone(&self, record: &IndexRecord, reason: &str) -> TombstoneEntry {
        TombstoneEntry {
            eol: self.eol.to_string(),
            last_update: record.last_update.clone(),
            reason: reason.to_string(),
            partition: None,
        }
    }

    fn partition_tombstones(
        &self,
        evidence: &EvidenceRef,
        record: &IndexRecord,
        partition_keys: &[String],
        reason: &str,
    ) -> Tombstones {
        let spec = record.partition_spec().or_else(|| evidence.partition.clone());
        let (fields, root) = spec
            .map(|spec| (spec.fields, spec.root))
            .unwrap_or_default();
        let partitions = record.partitions.clone().unwrap_or_default();

        partition_keys
            .iter()
            .map(|key| {
                let tombstone = TombstoneEntry {
                    partition: Some(PartitionTombstone {
                        partition_fields: fields.clone(),
                        partition_root: root.clone(),
                        partition_key: partitions.get(key).cloned().unwrap_or_default(),
                    }),
                    ..self.tombstone(record, reason)
                };
                (key.clone(), vec![tombstone])
            })
            .collect()
    }
}
