use std::path::{Path, PathBuf};

use crate::constants::{LOCAL_LOCKER_DIRNAME, LOCK_DIRNAME};
use crate::error::PruneError;

/// Expand a leading `~` to the current user's home directory
pub fn expand_home(path: impl AsRef<str>) -> Result<PathBuf, PruneError> {
    let path = path.as_ref();
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };
    let Some(home) = dirs::home_dir() else {
        return Err(PruneError::config(format!(
            "unable to expand {path}, home directory not found"
        )));
    };
    Ok(home.join(rest.trim_start_matches(['/', '\\'])))
}

pub fn read_from_path(path: impl AsRef<Path>) -> Result<String, PruneError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| {
        log::debug!("unable to read {path:?}: {err}");
        PruneError::IO(err)
    })
}

pub fn write_to_path(path: impl AsRef<Path>, data: impl AsRef<str>) -> Result<(), PruneError> {
    let path = path.as_ref();
    std::fs::write(path, data.as_ref()).map_err(|err| {
        log::debug!("unable to write {path:?}: {err}");
        PruneError::IO(err)
    })
}

pub fn remove_dir_all_if_exists(path: impl AsRef<Path>) -> Result<(), PruneError> {
    let path = path.as_ref();
    if path.exists() {
        log::debug!("removing directory {path:?}");
        std::fs::remove_dir_all(path)?;
    }
    Ok(())
}

/// `path` resolved against the current directory when it is relative
pub fn absolute_path(path: impl AsRef<Path>) -> Result<PathBuf, PruneError> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    Ok(dunce::simplified(&cwd).join(path))
}

/// Where the locker gets cloned when the caller does not say otherwise
pub fn default_local_locker_path() -> PathBuf {
    dunce::simplified(&std::env::temp_dir()).join(LOCAL_LOCKER_DIRNAME)
}

/// Directory holding the lock files that guard directory indexes
pub fn lock_dir() -> PathBuf {
    dunce::simplified(&std::env::temp_dir()).join(LOCK_DIRNAME)
}
