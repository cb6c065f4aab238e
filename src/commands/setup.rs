use anyhow::{Context as AnyhowContext, Result};
use std::fs;
use std::path::Path;

use crate::Context;
use crate::catalogue::RepoSet;
use crate::commands::{clone, install, status};
use crate::ui;

/// Clone (shallow), status and install in one pass.
///
/// The repo set is resolved once, up front, from the branch argument and
/// the optional requirements file, then threaded through every sub-step.
/// Sub-steps are best-effort: a failing step is reported and the next one
/// still runs. Only an unreadable requirements file aborts before any
/// per-repo work.
pub fn run(_ctx: &Context, branch: &str, requirements: Option<&Path>) -> Result<()> {
    let listing = match requirements {
        Some(path) => Some(fs::read_to_string(path).with_context(|| {
            format!("Could not read requirements file: {}", path.display())
        })?),
        None => None,
    };

    let repos = RepoSet::resolve(branch, true, listing.as_deref());
    if repos.is_empty() {
        ui::error("No catalogue repos matched the requirements file");
        return Ok(());
    }

    if let Err(e) = clone::clone_resolved(&repos, true) {
        ui::error(&format!("Clone step failed: {e:#}"));
    }
    if let Err(e) = status::status_resolved(&repos) {
        ui::error(&format!("Status step failed: {e:#}"));
    }
    if let Err(e) = install::install_resolved(&repos, false) {
        ui::error(&format!("Install step failed: {e:#}"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_requirements_file_aborts_before_any_repo_work() {
        let ctx = Context {
            verbose: 0,
            quiet: true,
        };
        let missing = Path::new("/no/such/requirements.txt");
        let err = run(&ctx, "master", Some(missing)).unwrap_err();
        assert!(err.to_string().contains("requirements"));
    }
}
