use anyhow::{Context as AnyhowContext, Result};
use std::fs;

use crate::Context;
use crate::catalogue::{MASTER, RepoSet};
use crate::commands::Report;
use crate::paths;
use crate::ui;
use crate::vcs::{GitCli, Vcs, VcsError};

pub fn run(ctx: &Context, shallow: bool, dev: bool) -> Result<()> {
    let repos = RepoSet::resolve(MASTER, dev, None);
    let reports = clone_resolved(&repos, shallow)?;

    let failed = reports.iter().filter(|r| r.is_failed()).count();
    if failed > 0 && !ctx.quiet {
        ui::error(&format!("{failed} of {} repos failed to clone", reports.len()));
    }
    Ok(())
}

/// Clone an already-resolved set. Also used by the setup composite.
///
/// Failure to create the base directory is fatal; everything after that is
/// reported per repo and the batch continues.
pub(crate) fn clone_resolved(repos: &RepoSet, shallow: bool) -> Result<Vec<Report>> {
    ui::header("Clone");

    let base = paths::repo_base()?;
    fs::create_dir_all(&base)
        .with_context(|| format!("Could not create base repos dir: {}", base.display()))?;

    let git = GitCli::new(base);
    Ok(clone_set(&git, repos, shallow, &mut |report: &Report| {
        report.print();
    }))
}

/// Sequentially clone every repo in the set at its pinned ref.
///
/// `on_report` fires as each repo is reached: once with a progress line
/// before the clone starts, then again with the outcome, so long batches
/// show progress instead of going silent. The returned vector holds only
/// the final outcome per repo.
pub(crate) fn clone_set<V: Vcs>(
    vcs: &V,
    repos: &RepoSet,
    shallow: bool,
    on_report: &mut dyn FnMut(&Report),
) -> Vec<Report> {
    repos
        .iter()
        .map(|(repo, branch)| {
            on_report(&Report::info(repo, format!("Cloning `{repo}`")));
            let report = match vcs.clone_repo(repo, branch, shallow) {
                Ok(out) if out.is_empty() => {
                    Report::success(repo, format!("Successfully cloned `{repo}`"))
                }
                Ok(out) => Report::success(repo, out),
                Err(VcsError::AlreadyCloned) => {
                    Report::info(repo, "Repo is already cloned (the folder exists)")
                }
                Err(e) => Report::failed(repo, format!("Could not clone repo `{repo}`: {e}")),
            };
            on_report(&report);
            report
        })
        .collect()
}
