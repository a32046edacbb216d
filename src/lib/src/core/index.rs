//! Reading and writing the `index.json` kept in every evidence directory

use std::path::{Path, PathBuf};

use crate::constants::INDEX_FILENAME;
use crate::error::PruneError;
use crate::model::{DirectoryIndex, IndexRecord};
use crate::util;

pub fn index_path(locker_path: &Path, directory: &str) -> PathBuf {
    locker_path.join(directory).join(INDEX_FILENAME)
}

/// Load a directory index. A missing or malformed file is a parse error.
pub fn read_index(path: &Path) -> Result<DirectoryIndex, PruneError> {
    let contents =
        std::fs::read_to_string(path).map_err(|err| PruneError::index_parse(path, err))?;
    serde_json::from_str(&contents).map_err(|err| PruneError::index_parse(path, err))
}

pub fn write_index(path: &Path, index: &DirectoryIndex) -> Result<(), PruneError> {
    util::fs::write_to_path(path, util::json::format_json(index)?)
}

/// The record for `name`, if the index has one
pub fn get_record(
    index: &DirectoryIndex,
    path: &Path,
    name: &str,
) -> Result<Option<IndexRecord>, PruneError> {
    let Some(value) = index.get(name) else {
        return Ok(None);
    };
    let record = serde_json::from_value(value.clone())
        .map_err(|err| PruneError::index_parse(path, format!("record {name}: {err}")))?;
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::index;
    use crate::error::PruneError;
    use crate::test;

    #[test]
    fn test_read_missing_index_is_a_parse_error() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let path = index::index_path(locker, "raw/bar");
            let result = index::read_index(&path);
            assert!(matches!(result, Err(PruneError::IndexParse { .. })));
            Ok(())
        })
    }

    #[test]
    fn test_read_malformed_index_is_a_parse_error() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let path = index::index_path(locker, "raw/bar");
            test::write_txt_file_to_path(&path, "{not json")?;
            let result = index::read_index(&path);
            assert!(matches!(result, Err(PruneError::IndexParse { .. })));

            test::write_txt_file_to_path(&path, "[1, 2]")?;
            let result = index::read_index(&path);
            assert!(matches!(result, Err(PruneError::IndexParse { .. })));
            Ok(())
        })
    }

    #[test]
    fn test_write_then_read_keeps_other_records() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let path = test::write_index(
                locker,
                "raw/bar",
                &json!({
                    "foo.json": {"description": "Foo", "last_update": "T0", "ttl": 1},
                    "other.json": {"description": "Other", "custom": [1, 2, 3]}
                }),
            )?;

            let mut loaded = index::read_index(&path)?;
            loaded.insert("foo.json".to_string(), json!({"description": "Pruned"}));
            index::write_index(&path, &loaded)?;

            assert_eq!(
                test::read_index(locker, "raw/bar")?,
                json!({
                    "foo.json": {"description": "Pruned"},
                    "other.json": {"description": "Other", "custom": [1, 2, 3]}
                })
            );
            Ok(())
        })
    }

    #[test]
    fn test_get_record() -> Result<(), PruneError> {
        test::run_empty_locker_test(|locker| {
            let path = test::write_index(
                locker,
                "raw/bar",
                &json!({"foo.json": {"description": "Foo", "last_update": "T0", "ttl": 5}}),
            )?;
            let loaded = index::read_index(&path)?;

            let record = index::get_record(&loaded, &path, "foo.json")?.unwrap();
            assert_eq!(record.last_update.as_deref(), Some("T0"));
            assert_eq!(record.ttl_seconds(), Some(5));
            assert!(index::get_record(&loaded, &path, "missing.json")?.is_none());
            Ok(())
        })
    }
}
