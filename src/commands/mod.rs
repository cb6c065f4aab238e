//! One module per orchestrated command.
//!
//! Each command has a report-returning core generic over [`crate::vcs::Vcs`]
//! and a thin wrapper that resolves the repo set, builds the concrete
//! facade and prints the reports. Per-repo failures are carried inside the
//! reports; a command only returns `Err` for fatal environment problems.

pub mod checkout;
pub mod clone;
pub mod install;
pub mod pull;
pub mod setup;
pub mod status;

use colored::Colorize;

use crate::ui;

/// Result of one operation against one repository.
///
/// Outcomes are independent: a `Failed` report for one repo never affects
/// the reports of its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation succeeded; payload is the command output (may be empty).
    Success(String),
    /// A demoted condition worth telling the user about, not an error.
    Info(String),
    /// The operation failed for this repository.
    Failed(String),
}

/// One outcome, tagged with the repository (or package) it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub repo: String,
    pub outcome: Outcome,
}

impl Report {
    pub fn success(repo: &str, text: impl Into<String>) -> Self {
        Self {
            repo: repo.to_string(),
            outcome: Outcome::Success(text.into()),
        }
    }

    pub fn info(repo: &str, text: impl Into<String>) -> Self {
        Self {
            repo: repo.to_string(),
            outcome: Outcome::Info(text.into()),
        }
    }

    pub fn failed(repo: &str, text: impl Into<String>) -> Self {
        Self {
            repo: repo.to_string(),
            outcome: Outcome::Failed(text.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    /// Render this report as tagged lines.
    pub fn print(&self) {
        match &self.outcome {
            Outcome::Success(text) | Outcome::Info(text) => ui::repo_output(&self.repo, text),
            Outcome::Failed(text) => {
                for line in ui::payload_lines(text) {
                    ui::repo_line(&self.repo, &line.red().to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failed_reports_count_as_failures() {
        assert!(Report::failed("docl", "boom").is_failed());
        assert!(!Report::success("docl", "").is_failed());
        assert!(!Report::info("docl", "skipped").is_failed());
    }
}
