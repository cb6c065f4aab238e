//! Path and remote-URL resolution.
//!
//! Every repository is checked out directly under a single base directory.
//! The base is taken from the `CONVOY_REPO_BASE` environment variable when
//! set (tilde-expanded), otherwise it defaults to `~/dev/repos`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the repo base directory.
pub const ENV_REPO_BASE: &str = "CONVOY_REPO_BASE";

/// Remote URL for a catalogue repository.
pub fn remote_url(repo: &str) -> String {
    format!("git@github.com:cloudify-cosmo/{repo}.git")
}

/// Resolve the base directory under which all repos live.
pub fn repo_base() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_REPO_BASE) {
        let expanded = shellexpand::tilde(&dir);
        let path = PathBuf::from(expanded.as_ref());
        log::debug!("using repo base from {}: {}", ENV_REPO_BASE, path.display());
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join("dev").join("repos"))
}

/// Local checkout path for a repo (or a package path beneath one).
pub fn repo_path(base: &Path, repo: &str) -> PathBuf {
    base.join(repo)
}
