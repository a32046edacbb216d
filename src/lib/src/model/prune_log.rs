/// Repository relative paths pruned during one session, in processing order.
///
/// Only used to compose the commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneLog {
    paths: Vec<String>,
}

impl PruneLog {
    pub fn new() -> PruneLog {
        PruneLog::default()
    }

    pub fn push(&mut self, path: impl AsRef<str>) {
        self.paths.push(path.as_ref().to_string());
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// One path per line
    pub fn lines(&self) -> String {
        self.paths.join("\n")
    }
}
