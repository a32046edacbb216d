//! # libprune
//!
//! Remove evidence from a git backed evidence locker and leave a tombstone
//! behind in the directory index, recording who removed it, when, and why.
//!
//! The public entry points live in [`repositories::prune`]. The lower level
//! pieces, the tombstone recorder and the pruning session, live in [`core`].

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod model;
pub mod opts;
pub mod repositories;
pub mod util;
