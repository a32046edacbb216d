/// One evidence path to prune and the reason for pruning it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneRequest {
    pub path: String,
    pub reason: String,
}

impl PruneRequest {
    pub fn new(path: impl AsRef<str>, reason: impl AsRef<str>) -> PruneRequest {
        PruneRequest {
            path: path.as_ref().to_string(),
            reason: reason.as_ref().to_string(),
        }
    }
}
