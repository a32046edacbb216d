/// Fields that split one logical piece of evidence into several files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSpec {
    pub fields: Vec<String>,
    pub root: Option<String>,
}

/// A reference to one piece of evidence in the locker.
///
/// Built by an [`EvidenceStore`](crate::core::evidence_store::EvidenceStore)
/// when it resolves a user supplied path, and only read after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRef {
    /// File basename, unique within `directory`
    pub name: String,
    /// Repository relative directory, ex: `raw/github`
    pub directory: String,
    pub description: String,
    pub partition: Option<PartitionSpec>,
}

impl EvidenceRef {
    pub fn new(
        name: impl AsRef<str>,
        directory: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> EvidenceRef {
        EvidenceRef {
            name: name.as_ref().to_string(),
            directory: directory.as_ref().trim_matches('/').to_string(),
            description: description.as_ref().to_string(),
            partition: None,
        }
    }

    pub fn with_partition(mut self, fields: Vec<String>, root: Option<String>) -> EvidenceRef {
        self.partition = Some(PartitionSpec { fields, root });
        self
    }

    pub fn is_partitioned(&self) -> bool {
        self.partition.is_some()
    }

    /// Repository relative path of the evidence, ex: `raw/github/repos.json`
    pub fn path(&self) -> String {
        join(&self.directory, &self.name)
    }

    /// Repository relative path of one partition file
    pub fn partition_path(&self, partition_key: &str) -> String {
        join(&self.directory, &format!("{partition_key}_{}", self.name))
    }
}

/// Split a repository relative evidence path into `(directory, name)`
pub fn split_path(path: &str) -> Option<(String, String)> {
    let trimmed = path.trim().trim_matches('/');
    let (directory, name) = trimmed.rsplit_once('/')?;
    if directory.is_empty() || name.is_empty() {
        return None;
    }
    Some((directory.to_string(), name.to_string()))
}

fn join(directory: &str, name: &str) -> String {
    if directory.is_empty() {
        name.to_string()
    } else {
        format!("{directory}/{name}")
    }
}
