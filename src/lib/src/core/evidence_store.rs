use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use crate::core::index;
use crate::core::repository::Repository;
use crate::error::PruneError;
use crate::model::evidence::split_path;
use crate::model::{EvidenceRef, IndexRecord};
use crate::util;

/// Looks up evidence in the locker and removes partition files
pub trait EvidenceStore {
    /// Resolve a repository relative path to evidence. Expired evidence is
    /// only found when `ignore_ttl` is set.
    fn resolve(&self, path: &str, ignore_ttl: bool) -> Result<EvidenceRef, PruneError>;

    /// Remove the partition files for `partition_keys` and stage the removal
    fn remove_partitions(
        &self,
        evidence: &EvidenceRef,
        partition_keys: &[String],
    ) -> Result<(), PruneError>;
}

/// Evidence store backed by the directory indexes of a working copy
#[derive(Debug, Clone)]
pub struct LockerEvidenceStore<R: Repository> {
    repo: R,
}

impl<R: Repository> LockerEvidenceStore<R> {
    pub fn new(repo: R) -> LockerEvidenceStore<R> {
        LockerEvidenceStore { repo }
    }

    fn locker_path(&self) -> &Path {
        self.repo.path()
    }
}

impl<R: Repository> EvidenceStore for LockerEvidenceStore<R> {
    fn resolve(&self, path: &str, ignore_ttl: bool) -> Result<EvidenceRef, PruneError> {
        let Some((directory, name)) = split_path(path) else {
            return Err(PruneError::evidence_not_found(path));
        };

        let index_path = index::index_path(self.locker_path(), &directory);
        if !index_path.exists() {
            log::debug!("no index at {index_path:?} for {path}");
            return Err(PruneError::evidence_not_found(path));
        }
        let directory_index = index::read_index(&index_path)?;
        let Some(record) = index::get_record(&directory_index, &index_path, &name)? else {
            return Err(PruneError::evidence_not_found(path));
        };
        if record.is_pruned() {
            log::debug!("{path} has already been pruned");
            return Err(PruneError::evidence_not_found(path));
        }

        let mut evidence = EvidenceRef::new(
            &name,
            &directory,
            record.description.clone().unwrap_or_default(),
        );
        evidence.partition = record.partition_spec();

        if !evidence.is_partitioned() && !self.locker_path().join(evidence.path()).exists() {
            return Err(PruneError::evidence_not_found(path));
        }

        if !ignore_ttl && is_stale(&record, Utc::now()) {
            return Err(PruneError::EvidenceNotFound(format!(
                "evidence {path} is stale"
            )));
        }

        Ok(evidence)
    }

    fn remove_partitions(
        &self,
        evidence: &EvidenceRef,
        partition_keys: &[String],
    ) -> Result<(), PruneError> {
        if partition_keys.is_empty() {
            return Ok(());
        }
        let paths: Vec<PathBuf> = partition_keys
            .iter()
            .map(|key| self.locker_path().join(evidence.partition_path(key)))
            .collect();
        log::debug!(
            "removing {} partitions of {}",
            paths.len(),
            evidence.path()
        );
        self.repo.stage_removal(&paths)
    }
}

/// Evidence is stale once `last_update + ttl` has passed. A record without a
/// numeric ttl never goes stale, one whose `last_update` cannot be read
/// always is.
pub fn is_stale(record: &IndexRecord, now: DateTime<Utc>) -> bool {
    let Some(ttl) = record.ttl_seconds() else {
        return false;
    };
    let Some(last_update) = record
        .last_update
        .as_deref()
        .and_then(util::time::parse_timestamp)
    else {
        return true;
    };
    let Some(ttl) = Duration::try_seconds(ttl) else {
        return false;
    };
    last_update + ttl < now
}
