use anyhow::Result;

use crate::Context;
use crate::catalogue::{MASTER, RepoSet};
use crate::commands::Report;
use crate::paths;
use crate::ui;
use crate::vcs::{GitCli, Vcs};

pub fn run(_ctx: &Context, branch: &str) -> Result<()> {
    let mut repos = RepoSet::resolve(MASTER, true, None);
    repos.apply_branch(branch, MASTER);

    ui::header("Checkout");
    let git = GitCli::new(paths::repo_base()?);
    checkout_set(&git, &repos, &mut |report: &Report| report.print());
    Ok(())
}

/// Sequentially check out each repo's pinned ref, reporting each repo as
/// soon as its checkout finishes.
pub(crate) fn checkout_set<V: Vcs>(
    vcs: &V,
    repos: &RepoSet,
    on_report: &mut dyn FnMut(&Report),
) -> Vec<Report> {
    repos
        .iter()
        .map(|(repo, branch)| {
            let report = match vcs.checkout(repo, branch) {
                Ok(out) => Report::success(repo, out),
                Err(_) => Report::failed(repo, format!("Could not checkout branch `{branch}`")),
            };
            on_report(&report);
            report
        })
        .collect()
}
