//! Terminal output helpers.
//!
//! Every per-repo line is self-tagged with its repository name, so output
//! stays attributable even when the concurrent pull interleaves lines from
//! different repos.

use colored::Colorize;

/// Width of the repo-name column in tagged lines.
const REPO_COLUMN: usize = 35;

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a command header, centred in a 40-column dash rule.
pub fn header(title: &str) {
    println!("{}", rule(title, 40));
}

fn rule(title: &str, width: usize) -> String {
    let pad = width.saturating_sub(title.len());
    let left = pad / 2;
    let right = pad - left;
    format!(
        "{}{}{}",
        "-".repeat(left),
        title.blue(),
        "-".repeat(right)
    )
}

/// Print one line tagged with its repo name.
pub fn repo_line(repo: &str, line: &str) {
    println!("{:<width$}| {}", repo.green(), line, width = REPO_COLUMN);
}

/// Split command output into its non-blank lines.
pub fn payload_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|l| !l.is_empty())
}

/// Print multi-line command output, one tagged yellow line at a time.
/// Blank lines are skipped.
pub fn repo_output(repo: &str, output: &str) {
    for line in payload_lines(output) {
        repo_line(repo, &line.yellow().to_string());
    }
}

/// Print one `git status -s` line, colouring the status code and the path
/// separately when the line splits into exactly two tokens.
pub fn status_line(repo: &str, line: &str) {
    if line.is_empty() {
        return;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let rendered = if let [code, path] = tokens[..] {
        format!("{} {}", code.red(), path.green())
    } else {
        line.green().to_string()
    };
    repo_line(repo, &rendered);
}

/// Whether a pip output line should be shown. Only completed-install lines
/// surface unless verbose.
pub fn install_line_visible(line: &str, verbose: bool) -> bool {
    !line.is_empty() && (verbose || line.starts_with("Successfully installed"))
}
