pub mod credentials;
pub mod git_config;
pub mod prune_config;

pub use crate::config::credentials::Credentials;
pub use crate::config::git_config::GitConfig;
pub use crate::config::prune_config::PruneConfig;
