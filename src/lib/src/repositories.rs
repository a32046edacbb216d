//! Entry points for pruning a locker

pub mod prune;
