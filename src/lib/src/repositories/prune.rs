//! Prune evidence from a remote locker

use std::path::{Path, PathBuf};

use crate::config::credentials::redact_url;
use crate::config::{Credentials, GitConfig};
use crate::core::evidence_store::LockerEvidenceStore;
use crate::core::git::GitRepository;
use crate::core::session::PruneSession;
use crate::error::PruneError;
use crate::model::{LockerMode, PruneRequest};
use crate::opts::PruneOpts;
use crate::util;

/// What a pruning run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneSummary {
    /// Working copy the locker was cloned into
    pub local_path: PathBuf,
    /// Operator identity recorded in every pruned record
    pub pruned_by: String,
    /// Evidence paths pruned, in the order they were processed
    pub pruned: Vec<String>,
    pub mode: LockerMode,
}

/// Clone the locker described by `opts` and prune the requested evidence.
///
/// The working copy is left in place so the caller can inspect it. Use
/// [`remove_local_locker`] to clean it up.
pub fn prune(opts: &PruneOpts) -> Result<PruneSummary, PruneError> {
    let requests = opts.evidence.load()?.requests;
    let git_config = match &opts.git_config {
        Some(source) => Some(source.load()?),
        None => None,
    };
    let credentials = Credentials::load(&opts.creds_path)?;
    let url = credentials.url_with_credentials(&opts.locker_url)?;

    log::info!(
        "cloning {} into {:?}",
        redact_url(&opts.locker_url),
        opts.local_path
    );
    let repo = GitRepository::clone_locker(&url, &opts.local_path)?;
    prune_locker(repo, &requests, opts.mode, git_config.as_ref())
}

/// Prune `requests` from an existing working copy.
///
/// Everything pruned is committed as one commit, pushed when `mode` is
/// [`LockerMode::PushRemote`], even when a request fails part way through.
pub fn prune_locker(
    repo: GitRepository,
    requests: &[PruneRequest],
    mode: LockerMode,
    git_config: Option<&GitConfig>,
) -> Result<PruneSummary, PruneError> {
    if let Some(git_config) = git_config {
        repo.apply_config(git_config)?;
    }
    let pruned_by = repo.user_email()?;
    let local_path = repo.path.clone();
    log::debug!("pruning {} evidence as {pruned_by} in {mode} mode", requests.len());

    let store = LockerEvidenceStore::new(repo.clone());
    let pruned = PruneSession::new(repo, store, mode).run(|session| {
        session.prune_all(requests, &pruned_by)?;
        Ok(session.pruned().paths().to_vec())
    })?;

    Ok(PruneSummary {
        local_path,
        pruned_by,
        pruned,
        mode,
    })
}

pub fn remove_local_locker(path: impl AsRef<Path>) -> Result<(), PruneError> {
    util::fs::remove_dir_all_if_exists(path)
}
