//! Core pruning logic: the collaborators the pruner talks to, and the
//! tombstone recorder and session built on top of them.

pub mod evidence_store;
pub mod git;
pub mod index;
pub mod lock;
pub mod repository;
pub mod session;
pub mod tombstone;
