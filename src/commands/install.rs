use anyhow::Result;
use colored::Colorize;

use crate::Context;
use crate::catalogue::{MASTER, RepoSet};
use crate::commands::{Outcome, Report};
use crate::packages::{Package, derive_packages};
use crate::paths;
use crate::ui;
use crate::vcs::{GitCli, Vcs};

pub fn run(ctx: &Context, verbose: bool) -> Result<()> {
    let repos = RepoSet::resolve(MASTER, true, None);
    // Either the dedicated flag or global verbosity surfaces all pip output.
    install_resolved(&repos, verbose || ctx.verbose > 0)
}

pub(crate) fn install_resolved(repos: &RepoSet, verbose: bool) -> Result<()> {
    ui::header("Install");
    let pip = GitCli::new(paths::repo_base()?);

    install_set(&pip, &derive_packages(repos), &mut |report: &Report| {
        print_install_report(report, verbose);
    });
    Ok(())
}

fn print_install_report(report: &Report, verbose: bool) {
    match &report.outcome {
        Outcome::Success(output) | Outcome::Info(output) => {
            for line in output.lines() {
                if ui::install_line_visible(line, verbose) {
                    ui::repo_line(&report.repo, &line.yellow().to_string());
                }
            }
        }
        // Multi-line pip failures still get one tag per line.
        Outcome::Failed(_) => report.print(),
    }
}

/// Sequentially pip-install every derived package in editable mode,
/// reporting each package as it finishes.
pub(crate) fn install_set<V: Vcs>(
    vcs: &V,
    packages: &[Package],
    on_report: &mut dyn FnMut(&Report),
) -> Vec<Report> {
    packages
        .iter()
        .map(|package| {
            let report = match vcs.install(&package.path) {
                Ok(output) => Report::success(&package.name, output),
                Err(e) => {
                    Report::failed(&package.name, format!("Could not pip install repo: {e}"))
                }
            };
            on_report(&report);
            report
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::VcsError;
    use crate::vcs::fake::FakeVcs;

    fn ignore(_: &Report) {}

    #[test]
    fn one_package_failure_does_not_stop_the_batch() {
        let repos = RepoSet::resolve(MASTER, true, None);
        let packages = derive_packages(&repos);
        let vcs = FakeVcs::new().script(
            "install",
            "cloudify-manager/rest-service",
            Err(VcsError::Failed("No matching distribution".to_string())),
        );

        let reports = install_set(&vcs, &packages, &mut ignore);
        assert_eq!(reports.len(), packages.len());
        assert_eq!(reports.iter().filter(|r| r.is_failed()).count(), 1);

        let failed = reports.iter().find(|r| r.is_failed()).unwrap();
        assert_eq!(failed.repo, "cloudify-rest-service");
    }

    #[test]
    fn reports_each_package_as_it_finishes() {
        let repos = RepoSet::resolve(MASTER, true, None);
        let packages = derive_packages(&repos);
        let vcs = FakeVcs::new();
        let mut seen: Vec<String> = Vec::new();

        install_set(&vcs, &packages, &mut |report: &Report| {
            seen.push(report.repo.clone());
        });

        let expected: Vec<String> = packages.iter().map(|p| p.name.clone()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn installs_by_package_path_not_name() {
        let repos = RepoSet::resolve(MASTER, true, None);
        let vcs = FakeVcs::new();
        install_set(&vcs, &derive_packages(&repos), &mut ignore);

        let calls = vcs.calls.lock().unwrap();
        assert!(
            calls
                .iter()
                .any(|(_, path)| path == "cloudify-manager/workflows")
        );
        assert!(calls.iter().all(|(_, path)| path != "cloudify-manager"));
    }
}
