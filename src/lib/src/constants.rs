//! Constants used throughout the locker pruning code

/// Name of the metadata file colocated with evidence in each locker directory
pub const INDEX_FILENAME: &str = "index.json";
/// Default location of the credentials file
pub const DEFAULT_CREDENTIALS_PATH: &str = "~/.credentials";
/// Directory name of the local working copy under the system temp dir
pub const LOCAL_LOCKER_DIRNAME: &str = "prune";
/// Directory name under the system temp dir holding index lock files
pub const LOCK_DIRNAME: &str = "prune-locks";
/// First line of every prune commit, followed by the local time
pub const COMMIT_PREAMBLE: &str = "Pruned abandoned evidence at local time";
/// Remote that `git push` targets
pub const DEFAULT_REMOTE_NAME: &str = "origin";
/// Git config key that identifies the operator doing the pruning
pub const USER_EMAIL_KEY: &str = "user.email";

/// Format of the `eol` commit date, always UTC
pub const COMMIT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
/// `ctime` style format of the local time in commit messages
pub const LOCAL_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";
