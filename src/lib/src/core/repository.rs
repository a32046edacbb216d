use std::path::{Path, PathBuf};

use crate::error::PruneError;

/// The version controlled working copy of the locker.
///
/// Paths handed to the staging calls are absolute paths inside
/// [`Repository::path`].
pub trait Repository {
    /// Root of the working copy
    fn path(&self) -> &Path;

    /// Remove files from the working tree and stage their removal
    fn stage_removal(&self, paths: &[PathBuf]) -> Result<(), PruneError>;

    fn stage_add(&self, paths: &[PathBuf]) -> Result<(), PruneError>;

    fn commit(&self, message: &str) -> Result<(), PruneError>;

    fn push(&self) -> Result<(), PruneError>;
}
