use std::fmt;

/// How changes made to the local working copy reach the remote locker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockerMode {
    /// Commit locally, never push
    DryRun,
    /// Commit and push to the remote locker
    PushRemote,
}

impl LockerMode {
    pub fn pushes(&self) -> bool {
        matches!(self, LockerMode::PushRemote)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LockerMode::DryRun => "dry-run",
            LockerMode::PushRemote => "push-remote",
        }
    }
}

impl fmt::Display for LockerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::LockerMode;

    #[test]
    fn test_only_push_remote_pushes() {
        assert!(LockerMode::PushRemote.pushes());
        assert!(!LockerMode::DryRun.pushes());
    }

    #[test]
    fn test_display_matches_subcommand_names() {
        assert_eq!(LockerMode::DryRun.to_string(), "dry-run");
        assert_eq!(LockerMode::PushRemote.to_string(), "push-remote");
    }
}
