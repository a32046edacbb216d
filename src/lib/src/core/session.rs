//! # PruneSession
//!
//! One pruning run against a working copy of the locker. The session
//! resolves each requested evidence path, hands it to the
//! [`TombstoneRecorder`], and on close checks in everything it pruned as a
//! single commit, pushing it when the session runs in
//! [`LockerMode::PushRemote`].
//!
//! Closing always happens, whether or not pruning failed part way through.
//! Evidence pruned before a failure is still committed (and pushed), and the
//! failure is handed back to the caller afterwards.

use crate::constants::COMMIT_PREAMBLE;
use crate::core::evidence_store::EvidenceStore;
use crate::core::repository::Repository;
use crate::core::tombstone::TombstoneRecorder;
use crate::error::PruneError;
use crate::model::{EvidenceRef, LockerMode, PruneLog, PruneRequest};
use crate::util;

pub struct PruneSession<R: Repository, S: EvidenceStore> {
    repo: R,
    store: S,
    mode: LockerMode,
    eol: String,
    pruned: PruneLog,
}

impl<R: Repository, S: EvidenceStore> PruneSession<R, S> {
    pub fn new(repo: R, store: S, mode: LockerMode) -> PruneSession<R, S> {
        PruneSession {
            repo,
            store,
            mode,
            eol: util::time::commit_date(),
            pruned: PruneLog::new(),
        }
    }

    /// Use a fixed end of life date instead of the time the session opened
    pub fn with_eol(mut self, eol: impl AsRef<str>) -> PruneSession<R, S> {
        self.eol = eol.as_ref().to_string();
        self
    }

    pub fn eol(&self) -> &str {
        &self.eol
    }

    pub fn pruned(&self) -> &PruneLog {
        &self.pruned
    }

    pub fn remove_evidence(
        &mut self,
        evidence: &EvidenceRef,
        reason: &str,
        pruned_by: &str,
    ) -> Result<(), PruneError> {
        TombstoneRecorder::new(&self.repo, &self.store, &self.eol).remove_evidence(
            evidence,
            reason,
            pruned_by,
            &mut self.pruned,
        )
    }

    /// Resolve and prune a single request. Expired evidence can be pruned
    /// just like live evidence.
    pub fn prune(
        &mut self,
        request: &PruneRequest,
        pruned_by: &str,
    ) -> Result<EvidenceRef, PruneError> {
        let evidence = self.store.resolve(&request.path, true)?;
        self.remove_evidence(&evidence, &request.reason, pruned_by)?;
        Ok(evidence)
    }

    /// Prune requests in order, stopping at the first failure
    pub fn prune_all(
        &mut self,
        requests: &[PruneRequest],
        pruned_by: &str,
    ) -> Result<(), PruneError> {
        for request in requests {
            self.prune(request, pruned_by)?;
        }
        Ok(())
    }

    pub fn commit_message(&self, local_time: &str) -> String {
        format!("{COMMIT_PREAMBLE} {local_time}\n\n{}", self.pruned.lines())
    }

    /// Run `operation` against the session, then close it
    pub fn run<T, F>(mut self, operation: F) -> Result<T, PruneError>
    where
        F: FnOnce(&mut PruneSession<R, S>) -> Result<T, PruneError>,
    {
        let outcome = operation(&mut self);
        self.close(outcome)
    }

    /// Commit what was pruned, push in remote mode, then hand back `outcome`.
    ///
    /// When `outcome` is already an error it wins over any check-in failure,
    /// which is only logged.
    pub fn close<T>(self, outcome: Result<T, PruneError>) -> Result<T, PruneError> {
        if let Err(err) = &outcome {
            log::error!("{err}");
        }

        let message = self.commit_message(&util::time::local_time());
        let checked_in = self.repo.commit(&message).and_then(|_| {
            if self.mode.pushes() {
                self.repo.push()
            } else {
                log::debug!("{} mode, not pushing", self.mode);
                Ok(())
            }
        });

        match (outcome, checked_in) {
            (Err(err), Err(checkin_err)) => {
                log::error!("unable to check in pruned evidence: {checkin_err}");
                Err(err)
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(_), Err(checkin_err)) => Err(checkin_err),
            (Ok(value), Ok(())) => Ok(value),
        }
    }
}
