//! Cross process exclusion around one directory index update.
//!
//! Each index gets its own lock file under the system temp dir, so updates
//! to different directories never contend. The lock is not reentrant: taking
//! it again for the same index while it is held blocks.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use sha2::{Digest, Sha256};

use crate::error::PruneError;
use crate::util;

/// Run `operation` while holding the exclusive lock for `index_path`.
/// The lock is released when this returns, whether or not `operation` failed.
pub fn with_index_lock<T, F>(index_path: &Path, operation: F) -> Result<T, PruneError>
where
    F: FnOnce() -> Result<T, PruneError>,
{
    let lock_path = lock_path(index_path)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)?;
    let mut lock = RwLock::new(file);

    log::debug!("waiting on lock {lock_path:?} for {index_path:?}");
    let _guard = lock.write()?;
    log::debug!("acquired lock {lock_path:?}");

    operation()
}

/// Lock file for an index, named by the hash of its absolute path
pub fn lock_path(index_path: &Path) -> Result<PathBuf, PruneError> {
    let lock_dir = util::fs::lock_dir();
    std::fs::create_dir_all(&lock_dir)?;

    let absolute = dunce::canonicalize(index_path).unwrap_or_else(|_| index_path.to_path_buf());
    let digest = Sha256::digest(absolute.to_string_lossy().as_bytes());
    Ok(lock_dir.join(format!("{}.lock", hex::encode(digest))))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::evidence_store::LockerEvidenceStore;
    use crate::core::index;
    use crate::core::lock;
    use crate::core::tombstone::TombstoneRecorder;
    use crate::error::PruneError;
    use crate::model::{EvidenceRef, PruneLog};
    use crate::test::{self, FakeRepository};

    const WRITERS: usize = 16;

    #[test]
    fn test_lock_path_is_per_directory() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let foo = lock::lock_path(&index::index_path(locker, "raw/foo"))?;
            let bar = lock::lock_path(&index::index_path(locker, "raw/bar"))?;
            assert_ne!(foo, bar);
            assert_eq!(foo, lock::lock_path(&index::index_path(locker, "raw/foo"))?);
            Ok(())
        })
    }

    #[test]
    fn test_lock_is_released_after_failure() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let path = index::index_path(locker, "raw/foo");
            let failed: Result<(), PruneError> =
                lock::with_index_lock(&path, || Err(PruneError::basic_str("boom")));
            assert!(failed.is_err());

            // Would block forever if the first lock were still held
            let value = lock::with_index_lock(&path, || Ok(42))?;
            assert_eq!(value, 42);
            Ok(())
        })
    }

    #[test]
    fn test_different_directories_do_not_contend() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let foo = index::index_path(locker, "raw/foo");
            let bar = index::index_path(locker, "raw/bar");
            let value = lock::with_index_lock(&foo, || lock::with_index_lock(&bar, || Ok("ok")))?;
            assert_eq!(value, "ok");
            Ok(())
        })
    }

    #[test]
    fn test_writers_to_one_index_are_serialized() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let mut index = serde_json::Map::new();
            for i in 0..WRITERS {
                let name = format!("e{i}.json");
                index.insert(name.clone(), json!({"description": name, "last_update": "T0"}));
                test::write_txt_file_to_path(locker.join("raw/bar").join(&name), "{}")?;
            }
            test::write_index(locker, "raw/bar", &serde_json::Value::Object(index))?;

            let repo = FakeRepository::new(locker);
            let store = LockerEvidenceStore::new(repo.clone());
            let recorder = TombstoneRecorder::new(&repo, &store, "T1");

            let results: Vec<Result<(), PruneError>> = std::thread::scope(|scope| {
                let handles: Vec<_> = (0..WRITERS)
                    .map(|i| {
                        let recorder = &recorder;
                        scope.spawn(move || {
                            let evidence = EvidenceRef::new(format!("e{i}.json"), "raw/bar", "");
                            recorder.remove_evidence(&evidence, "abandoned", "alice", &mut PruneLog::new())
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|_| Err(PruneError::basic_str("writer panicked")))
                    })
                    .collect()
            });
            for result in results {
                result?;
            }

            let index = test::read_index(locker, "raw/bar")?;
            for i in 0..WRITERS {
                let name = format!("e{i}.json");
                assert_eq!(index[&name]["pruned_by"], json!("alice"), "{name} lost its tombstone");
                assert_eq!(index[&name]["tombstones"][&name][0]["eol"], json!("T1"));
            }
            Ok(())
        })
    }
}
