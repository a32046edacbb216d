pub mod prune_opts;

pub use crate::opts::prune_opts::{EvidenceSource, GitConfigSource, PruneArgs, PruneOpts};
