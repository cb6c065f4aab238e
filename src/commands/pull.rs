use anyhow::Result;
use std::thread;

use crate::Context;
use crate::catalogue::{MASTER, RepoSet};
use crate::commands::Report;
use crate::paths;
use crate::ui;
use crate::vcs::{GitCli, Vcs, VcsError};

pub fn run(_ctx: &Context) -> Result<()> {
    let repos = RepoSet::resolve(MASTER, true, None);
    pull_resolved(&repos)
}

pub(crate) fn pull_resolved(repos: &RepoSet) -> Result<()> {
    ui::header("Pull");
    let git = GitCli::new(paths::repo_base()?);
    // Reports print from inside the per-repo threads as they complete;
    // every line is self-tagged, so interleaving is harmless.
    pull_set(&git, repos, &|report: &Report| report.print());
    Ok(())
}

/// Pull every repo concurrently: one thread per repo, no cap, and a join
/// barrier at scope exit. The repo set is borrowed read-only by every
/// thread; a failed or hung repo never cancels its siblings.
///
/// Returns exactly one report per repo, in set order. `on_report` runs on
/// the worker thread as soon as that repo's outcome is known.
pub(crate) fn pull_set<V: Vcs>(
    vcs: &V,
    repos: &RepoSet,
    on_report: &(dyn Fn(&Report) + Sync),
) -> Vec<Report> {
    thread::scope(|scope| {
        let handles: Vec<_> = repos
            .iter()
            .map(|(repo, _)| {
                scope.spawn(move || {
                    let report = match vcs.pull(repo) {
                        Ok(out) => Report::success(repo, out),
                        Err(VcsError::NoUpstream) => {
                            Report::info(repo, "No upstream defined. Skipping pull.")
                        }
                        Err(e) => {
                            Report::failed(repo, format!("Could not pull repo `{repo}`: {e}"))
                        }
                    };
                    on_report(&report);
                    report
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("pull worker panicked"))
            .collect()
    })
}
