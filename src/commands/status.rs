use anyhow::Result;
use colored::Colorize;

use crate::Context;
use crate::catalogue::{MASTER, RepoSet};
use crate::paths;
use crate::ui;
use crate::vcs::{GitCli, Vcs};

/// Status of one repository's checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RepoStatus {
    /// Current ref plus the short working-tree status lines.
    Resolved {
        current_ref: String,
        changes: Vec<String>,
    },
    /// Neither a branch name nor an exact tag could be determined (or the
    /// repo is not cloned at all).
    Unresolved,
    /// The ref resolved but the status command itself failed.
    Failed {
        current_ref: String,
        message: String,
    },
}

pub fn run(_ctx: &Context) -> Result<()> {
    let repos = RepoSet::resolve(MASTER, true, None);
    status_resolved(&repos)
}

pub(crate) fn status_resolved(repos: &RepoSet) -> Result<()> {
    ui::header("Status");
    let git = GitCli::new(paths::repo_base()?);
    status_set(&git, repos, &mut print_status);
    Ok(())
}

fn print_status(repo: &str, status: &RepoStatus) {
    match status {
        RepoStatus::Resolved {
            current_ref,
            changes,
        } => {
            ui::repo_line(repo, current_ref);
            for line in changes {
                ui::status_line(repo, line);
            }
        }
        RepoStatus::Unresolved => {
            ui::repo_line(repo, &"could not resolve current branch or tag".red().to_string());
        }
        RepoStatus::Failed {
            current_ref,
            message,
        } => {
            ui::repo_line(repo, current_ref);
            for line in ui::payload_lines(message) {
                ui::repo_line(repo, &line.red().to_string());
            }
        }
    }
}

/// Sequentially resolve every repo's current ref and short status,
/// reporting each repo through `on_status` as soon as it is known.
///
/// A repo whose ref cannot be determined is unresolved; a repo whose ref
/// resolves but whose status command fails carries that failure message.
/// Either way the batch never aborts on one repo.
pub(crate) fn status_set<V: Vcs>(
    vcs: &V,
    repos: &RepoSet,
    on_status: &mut dyn FnMut(&str, &RepoStatus),
) -> Vec<(String, RepoStatus)> {
    repos
        .iter()
        .map(|(repo, _)| {
            let status = match vcs.current_ref(repo) {
                Err(_) => RepoStatus::Unresolved,
                Ok(current_ref) => match vcs.status(repo) {
                    Ok(output) => RepoStatus::Resolved {
                        current_ref,
                        changes: output
                            .lines()
                            .filter(|l| !l.is_empty())
                            .map(String::from)
                            .collect(),
                    },
                    Err(e) => RepoStatus::Failed {
                        current_ref,
                        message: e.to_string(),
                    },
                },
            };
            on_status(repo, &status);
            (repo.to_string(), status)
        })
        .collect()
}
