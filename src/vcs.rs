//! The version-control and package-manager facade.
//!
//! Commands never shell out directly; they go through the [`Vcs`] trait,
//! one method per operation. The concrete [`GitCli`] adapter builds the
//! actual `git`/`pip` invocations and classifies their failures into the
//! [`VcsError`] taxonomy, so orchestration code pattern-matches variants
//! instead of grepping exception text. Tests substitute a scripted fake.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::paths;
use crate::runner;

/// Failure taxonomy for facade operations.
///
/// `AlreadyCloned` and `NoUpstream` are the two conditions the orchestrator
/// demotes to informational outcomes; everything else is reported as a
/// per-repo failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VcsError {
    /// Clone target directory already exists.
    #[error("destination path already exists")]
    AlreadyCloned,

    /// Pull on a branch with no remote tracking branch.
    #[error("no upstream configured")]
    NoUpstream,

    /// HEAD is neither a symbolic ref nor an exact tag match.
    #[error("could not resolve current branch or tag")]
    UnresolvableRef,

    /// The underlying command exited non-zero.
    #[error("{0}")]
    Failed(String),

    /// The underlying command could not be started at all.
    #[error("could not run {command}: {message}")]
    Spawn { command: String, message: String },
}

/// One facade operation per orchestrated command.
///
/// `Sync` because `pull` shares a single instance across its per-repo
/// threads. All methods are synchronous: each call runs one subprocess to
/// completion and returns its trimmed output.
pub trait Vcs: Sync {
    /// Clone `repo` at `branch` into its place under the base directory.
    fn clone_repo(&self, repo: &str, branch: &str, shallow: bool) -> Result<String, VcsError>;

    /// Pull the currently checked-out branch of `repo`.
    fn pull(&self, repo: &str) -> Result<String, VcsError>;

    /// Check out `branch` in `repo`.
    fn checkout(&self, repo: &str, branch: &str) -> Result<String, VcsError>;

    /// Short working-tree status (`git status -s`) of `repo`.
    fn status(&self, repo: &str) -> Result<String, VcsError>;

    /// Current branch name, or the exact-match tag when HEAD is detached.
    fn current_ref(&self, repo: &str) -> Result<String, VcsError>;

    /// Editable pip install of the package at `path` under the base.
    fn install(&self, path: &str) -> Result<String, VcsError>;
}

/// Shell-out adapter: `git` and `pip` against checkouts under `base`.
pub struct GitCli {
    base: PathBuf,
}

impl GitCli {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Run git against one repo's checkout, from any working directory.
    fn git(&self, repo: &str, args: &[&str]) -> Result<String, VcsError> {
        let work_tree = paths::repo_path(&self.base, repo);
        let git_dir = work_tree.join(".git");

        let mut full: Vec<String> = vec![
            "--no-pager".to_string(),
            "--git-dir".to_string(),
            git_dir.display().to_string(),
            "--work-tree".to_string(),
            work_tree.display().to_string(),
        ];
        full.extend(args.iter().map(|a| (*a).to_string()));

        run_classified("git", &full)
    }
}

fn run_classified(cmd: &str, args: &[String]) -> Result<String, VcsError> {
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let capture = runner::run_capture(cmd, &arg_refs).map_err(|e| VcsError::Spawn {
        command: cmd.to_string(),
        message: e.to_string(),
    })?;

    if capture.success {
        Ok(capture.stdout)
    } else {
        Err(VcsError::Failed(capture.stderr))
    }
}

/// A clone refused because the destination directory exists.
fn classify_clone(err: VcsError) -> VcsError {
    match err {
        VcsError::Failed(msg) if msg.contains("fatal: destination path") => {
            VcsError::AlreadyCloned
        }
        other => other,
    }
}

/// A pull refused because the branch has no remote tracking branch.
fn classify_pull(err: VcsError) -> VcsError {
    match err {
        VcsError::Failed(msg) if msg.contains("no tracking information") => VcsError::NoUpstream,
        other => other,
    }
}

impl Vcs for GitCli {
    fn clone_repo(&self, repo: &str, branch: &str, shallow: bool) -> Result<String, VcsError> {
        let url = paths::remote_url(repo);
        let dest = paths::repo_path(&self.base, repo);

        let mut args = vec![
            "clone".to_string(),
            url,
            dest.display().to_string(),
            "--branch".to_string(),
            branch.to_string(),
        ];
        if shallow {
            args.push("--depth".to_string());
            args.push("1".to_string());
        }

        run_classified("git", &args).map_err(classify_clone)
    }

    fn pull(&self, repo: &str) -> Result<String, VcsError> {
        self.git(repo, &["pull"]).map_err(classify_pull)
    }

    fn checkout(&self, repo: &str, branch: &str) -> Result<String, VcsError> {
        self.git(repo, &["checkout", branch])
    }

    fn status(&self, repo: &str) -> Result<String, VcsError> {
        self.git(repo, &["status", "-s"])
    }

    fn current_ref(&self, repo: &str) -> Result<String, VcsError> {
        // Branch name first; on detached HEAD fall back to an exact tag.
        if let Ok(branch) = self.git(repo, &["symbolic-ref", "-q", "--short", "HEAD"]) {
            if !branch.is_empty() {
                return Ok(branch);
            }
        }
        match self.git(repo, &["describe", "--tags", "--exact-match"]) {
            Ok(tag) => Ok(tag),
            Err(VcsError::Spawn { command, message }) => Err(VcsError::Spawn { command, message }),
            Err(_) => Err(VcsError::UnresolvableRef),
        }
    }

    fn install(&self, path: &str) -> Result<String, VcsError> {
        let package_path = self.base.join(Path::new(path));
        let args = vec![
            "install".to_string(),
            "-e".to_string(),
            package_path.display().to_string(),
        ];
        run_classified("pip", &args)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_destination_exists_is_already_cloned() {
        let err = VcsError::Failed(
            "fatal: destination path 'cloudify-cli' already exists and is not an empty directory."
                .to_string(),
        );
        assert_eq!(classify_clone(err), VcsError::AlreadyCloned);
    }

    #[test]
    fn other_clone_failures_pass_through() {
        let err = VcsError::Failed("fatal: repository not found".to_string());
        assert_eq!(
            classify_clone(err),
            VcsError::Failed("fatal: repository not found".to_string())
        );
    }

    #[test]
    fn pull_without_tracking_branch_is_no_upstream() {
        let err = VcsError::Failed(
            "There is no tracking information for the current branch.".to_string(),
        );
        assert_eq!(classify_pull(err), VcsError::NoUpstream);
    }

    #[test]
    fn pull_merge_conflicts_stay_failures() {
        let err = VcsError::Failed("error: Your local changes would be overwritten".to_string());
        assert!(matches!(classify_pull(err), VcsError::Failed(_)));
    }

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(
            VcsError::NoUpstream.to_string(),
            "no upstream configured"
        );
        assert_eq!(VcsError::Failed("boom".to_string()).to_string(), "boom");
    }
}
