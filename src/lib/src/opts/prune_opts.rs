use std::path::PathBuf;

use url::Url;

use crate::config::{GitConfig, PruneConfig};
use crate::constants::DEFAULT_CREDENTIALS_PATH;
use crate::error::PruneError;
use crate::model::LockerMode;
use crate::util;

/// Raw arguments as they come off the command line
#[derive(Clone, Debug, Default)]
pub struct PruneArgs {
    pub locker: String,
    pub creds: Option<String>,
    pub config: Option<String>,
    pub config_file: Option<String>,
    pub git_config: Option<String>,
    pub git_config_file: Option<String>,
    pub local_path: Option<PathBuf>,
}

/// Where the evidence to prune is listed
#[derive(Clone, Debug, PartialEq)]
pub enum EvidenceSource {
    Inline(PruneConfig),
    File(PathBuf),
}

impl EvidenceSource {
    pub fn load(&self) -> Result<PruneConfig, PruneError> {
        match self {
            EvidenceSource::Inline(config) => Ok(config.clone()),
            EvidenceSource::File(path) => PruneConfig::from_file(path),
        }
    }
}

/// Where the git configuration for the working copy comes from
#[derive(Clone, Debug, PartialEq)]
pub enum GitConfigSource {
    Inline(GitConfig),
    File(PathBuf),
}

impl GitConfigSource {
    pub fn load(&self) -> Result<GitConfig, PruneError> {
        match self {
            GitConfigSource::Inline(config) => Ok(config.clone()),
            GitConfigSource::File(path) => GitConfig::from_file(path),
        }
    }
}

/// Validated options for one pruning run
#[derive(Clone, Debug)]
pub struct PruneOpts {
    pub locker_url: String,
    pub creds_path: PathBuf,
    pub evidence: EvidenceSource,
    pub git_config: Option<GitConfigSource>,
    pub mode: LockerMode,
    pub local_path: PathBuf,
}

impl PruneOpts {
    /// Validate `args` before anything touches the locker
    pub fn from_args(args: &PruneArgs, mode: LockerMode) -> Result<PruneOpts, PruneError> {
        validate_locker_url(&args.locker)?;

        let inline_config = match &args.config {
            Some(json) => Some(PruneConfig::from_json(json)?).filter(|config| !config.is_empty()),
            None => None,
        };
        let evidence = match (inline_config, non_empty(&args.config_file)) {
            (Some(config), None) => EvidenceSource::Inline(config),
            (None, Some(path)) => EvidenceSource::File(util::fs::expand_home(path)?),
            _ => {
                return Err(PruneError::validation(
                    "Provide either a --config or a --config-file.",
                ))
            }
        };

        let git_config = match (non_empty(&args.git_config), non_empty(&args.git_config_file)) {
            (Some(_), Some(_)) => {
                return Err(PruneError::validation(
                    "Provide either a --git-config or a --git-config-file.",
                ))
            }
            (Some(json), None) => Some(GitConfigSource::Inline(GitConfig::from_json(json)?)),
            (None, Some(path)) => Some(GitConfigSource::File(util::fs::expand_home(path)?)),
            (None, None) => None,
        };

        let creds = non_empty(&args.creds).unwrap_or(DEFAULT_CREDENTIALS_PATH);
        let local_path = args
            .local_path
            .clone()
            .unwrap_or_else(util::fs::default_local_locker_path);

        Ok(PruneOpts {
            locker_url: args.locker.clone(),
            creds_path: util::fs::expand_home(creds)?,
            evidence,
            git_config,
            mode,
            local_path,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

fn validate_locker_url(locker: &str) -> Result<(), PruneError> {
    let invalid = || PruneError::validation("locker url must be of the form https://hostname/org/repo");
    let url = Url::parse(locker).map_err(|_| invalid())?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    let has_path = !url.path().trim_start_matches('/').is_empty();
    if url.scheme().is_empty() || !has_host || !has_path {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::error::PruneError;
    use crate::model::{LockerMode, PruneRequest};
    use crate::opts::{EvidenceSource, GitConfigSource, PruneArgs, PruneOpts};

    const LOCKER: &str = "https://github.com/my-org/my-locker";

    fn args(config: Option<&str>, config_file: Option<&str>) -> PruneArgs {
        PruneArgs {
            locker: LOCKER.to_string(),
            config: config.map(String::from),
            config_file: config_file.map(String::from),
            local_path: Some(PathBuf::from("/tmp/prune-test")),
            ..PruneArgs::default()
        }
    }

    fn is_validation(result: Result<PruneOpts, PruneError>, message: &str) -> bool {
        matches!(result, Err(PruneError::Validation(m)) if m.contains(message))
    }

    #[test]
    fn test_inline_config() -> Result<(), PruneError> {
        let opts = PruneOpts::from_args(
            &args(Some(r#"{"raw/foo/foo.json": "abandoned"}"#), None),
            LockerMode::DryRun,
        )?;
        let config = opts.evidence.load()?;
        assert_eq!(
            config.requests,
            vec![PruneRequest::new("raw/foo/foo.json", "abandoned")]
        );
        assert_eq!(opts.mode, LockerMode::DryRun);
        assert_eq!(opts.local_path, PathBuf::from("/tmp/prune-test"));
        assert!(opts.git_config.is_none());
        Ok(())
    }

    #[test]
    fn test_config_file() -> Result<(), PruneError> {
        let opts = PruneOpts::from_args(
            &args(None, Some("/tmp/evidence.json")),
            LockerMode::PushRemote,
        )?;
        assert_eq!(
            opts.evidence,
            EvidenceSource::File(PathBuf::from("/tmp/evidence.json"))
        );
        Ok(())
    }

    #[test]
    fn test_exactly_one_evidence_source() {
        let message = "Provide either a --config or a --config-file.";
        assert!(is_validation(
            PruneOpts::from_args(&args(None, None), LockerMode::DryRun),
            message
        ));
        assert!(is_validation(
            PruneOpts::from_args(
                &args(Some(r#"{"raw/foo/foo.json": "x"}"#), Some("/tmp/evidence.json")),
                LockerMode::DryRun
            ),
            message
        ));
        // An empty object counts as not given
        assert!(is_validation(
            PruneOpts::from_args(&args(Some("{}"), None), LockerMode::DryRun),
            message
        ));
    }

    #[test]
    fn test_empty_inline_config_with_file_is_fine() -> Result<(), PruneError> {
        let opts = PruneOpts::from_args(
            &args(Some("{}"), Some("/tmp/evidence.json")),
            LockerMode::DryRun,
        )?;
        assert!(matches!(opts.evidence, EvidenceSource::File(_)));
        Ok(())
    }

    #[test]
    fn test_at_most_one_git_config_source() -> Result<(), PruneError> {
        let mut both = args(Some(r#"{"raw/foo/foo.json": "x"}"#), None);
        both.git_config = Some(r#"{"user": {"email": "a@b.c"}}"#.to_string());
        both.git_config_file = Some("/tmp/git.json".to_string());
        assert!(is_validation(
            PruneOpts::from_args(&both, LockerMode::DryRun),
            "Provide either a --git-config or a --git-config-file."
        ));

        both.git_config_file = None;
        let opts = PruneOpts::from_args(&both, LockerMode::DryRun)?;
        assert!(matches!(opts.git_config, Some(GitConfigSource::Inline(_))));
        Ok(())
    }

    #[test]
    fn test_locker_url_must_have_scheme_host_and_path() {
        let message = "locker url must be of the form https://hostname/org/repo";
        for locker in ["github.com/my-org/my-locker", "https://github.com", "not a url", ""] {
            let mut bad = args(Some(r#"{"raw/foo/foo.json": "x"}"#), None);
            bad.locker = locker.to_string();
            assert!(
                is_validation(PruneOpts::from_args(&bad, LockerMode::DryRun), message),
                "{locker} should be rejected"
            );
        }
    }

    #[test]
    fn test_url_is_checked_before_config() {
        let mut bad = args(None, None);
        bad.locker = "nope".to_string();
        assert!(is_validation(
            PruneOpts::from_args(&bad, LockerMode::DryRun),
            "locker url"
        ));
    }

    #[test]
    fn test_invalid_inline_config() {
        let result = PruneOpts::from_args(&args(Some("{not json"), None), LockerMode::DryRun);
        assert!(matches!(result, Err(PruneError::Config(_))));
    }
}
