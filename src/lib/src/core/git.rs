//! [`Repository`] backed by the `git` command line

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::config::credentials::redact_url;
use crate::config::GitConfig;
use crate::constants::{DEFAULT_REMOTE_NAME, USER_EMAIL_KEY};
use crate::core::repository::Repository;
use crate::error::PruneError;
use crate::util;

/// A git working copy of the locker
#[derive(Debug, Clone)]
pub struct GitRepository {
    pub path: PathBuf,
}

impl GitRepository {
    /// Open an existing working copy
    pub fn open(path: impl AsRef<Path>) -> Result<GitRepository, PruneError> {
        let path = path.as_ref();
        if !path.join(".git").exists() {
            return Err(PruneError::repository(format!(
                "{path:?} is not a git repository"
            )));
        }
        Ok(GitRepository {
            path: path.to_path_buf(),
        })
    }

    /// Clone `url` into `dst`. Anything already at `dst` is removed first so
    /// every run starts from a fresh copy of the remote.
    pub fn clone_locker(url: &str, dst: impl AsRef<Path>) -> Result<GitRepository, PruneError> {
        let dst = util::fs::absolute_path(dst)?;
        let dst = dst.as_path();
        util::fs::remove_dir_all_if_exists(dst)?;
        let parent = dst.parent().unwrap_or(Path::new("/"));
        std::fs::create_dir_all(parent)?;

        log::debug!("cloning {} into {dst:?}", redact_url(url));
        let args: Vec<OsString> = vec![
            "clone".into(),
            "--quiet".into(),
            url.into(),
            dst.as_os_str().to_owned(),
        ];
        let output = run_git(parent, &args)?;
        check_output(output, &format!("clone {}", redact_url(url)))?;
        GitRepository::open(dst)
    }

    pub fn config_value(&self, key: &str) -> Result<Option<String>, PruneError> {
        let output = self.git(["config", "--get", key])?;
        // Exit status 1 means the key is not set
        if output.status.code() == Some(1) {
            return Ok(None);
        }
        let output = check_output(output, &format!("config --get {key}"))?;
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }

    pub fn set_config(&self, key: &str, value: &str) -> Result<(), PruneError> {
        let output = self.git(["config", key, value])?;
        check_output(output, &format!("config {key}"))?;
        Ok(())
    }

    pub fn apply_config(&self, config: &GitConfig) -> Result<(), PruneError> {
        for (key, value) in config.entries()? {
            log::debug!("setting git config {key}");
            self.set_config(&key, &value)?;
        }
        Ok(())
    }

    /// Email of the operator, taken from the working copy's git config
    pub fn user_email(&self) -> Result<String, PruneError> {
        match self.config_value(USER_EMAIL_KEY)? {
            Some(email) if !email.is_empty() => Ok(email),
            _ => Err(PruneError::repository(
                "git user.email is not set, provide it with --git-config",
            )),
        }
    }

    pub fn has_staged_changes(&self) -> Result<bool, PruneError> {
        let output = self.git(["diff", "--cached", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(git_failure("diff --cached", &output)),
        }
    }

    /// Message of the latest commit on the current branch
    pub fn last_commit_message(&self) -> Result<String, PruneError> {
        let output = self.git(["log", "-1", "--format=%B"])?;
        let output = check_output(output, "log")?;
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    fn git<I, S>(&self, args: I) -> Result<Output, PruneError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .collect();
        run_git(&self.path, &args)
    }

    fn git_with_paths(&self, args: &[&str], paths: &[PathBuf]) -> Result<Output, PruneError> {
        let mut all_args: Vec<OsString> = args.iter().map(OsString::from).collect();
        all_args.push("--".into());
        all_args.extend(paths.iter().map(|path| path.as_os_str().to_owned()));
        run_git(&self.path, &all_args)
    }
}

impl Repository for GitRepository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn stage_removal(&self, paths: &[PathBuf]) -> Result<(), PruneError> {
        let output = self.git_with_paths(&["rm", "--quiet"], paths)?;
        check_output(output, "rm")?;
        Ok(())
    }

    fn stage_add(&self, paths: &[PathBuf]) -> Result<(), PruneError> {
        let output = self.git_with_paths(&["add"], paths)?;
        check_output(output, "add")?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<(), PruneError> {
        if !self.has_staged_changes()? {
            log::info!("nothing staged in {:?}, skipping commit", self.path);
            return Ok(());
        }
        let output = self.git(["commit", "--quiet", "-m", message])?;
        check_output(output, "commit")?;
        Ok(())
    }

    fn push(&self) -> Result<(), PruneError> {
        let output = self.git(["push", "--quiet", DEFAULT_REMOTE_NAME, "HEAD"])?;
        check_output(output, "push")?;
        Ok(())
    }
}

fn run_git(cwd: &Path, args: &[OsString]) -> Result<Output, PruneError> {
    log::debug!(
        "git {}",
        args.iter()
            .map(|arg| redact_url(&arg.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    );
    Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|err| PruneError::repository(format!("failed to run git: {err}")))
}

fn check_output(output: Output, description: &str) -> Result<Output, PruneError> {
    if output.status.success() {
        Ok(output)
    } else {
        Err(git_failure(description, &output))
    }
}

fn git_failure(description: &str, output: &Output) -> PruneError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    PruneError::repository(format!("git {description} failed: {}", stderr.trim()))
}
