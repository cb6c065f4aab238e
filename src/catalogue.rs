//! The repository catalogue and per-invocation repo-set resolution.
//!
//! The catalogue is a fixed, ordered list of repository names split into a
//! core subset and a core+dev superset. Every command operates on a
//! [`RepoSet`]: the ordered `repo -> ref` mapping resolved for one
//! invocation from the catalogue, an optional requirements listing and an
//! optional branch argument. Catalogue order defines iteration and display
//! order everywhere.

/// Default branch assumed when nothing pins a repo elsewhere.
pub const MASTER: &str = "master";

/// Core repositories, in canonical order.
pub const CORE_REPOS: &[&str] = &[
    "cloudify-dsl-parser",
    "cloudify-rest-client",
    "cloudify-plugins-common",
    "cloudify-diamond-plugin",
    "cloudify-agent",
    "cloudify-cli",
    "cloudify-manager",
    "cloudify-manager-blueprints",
    "cloudify-premium",
    "cloudify-script-plugin",
    "cloudify-amqp-influxdb",
    "docl",
];

/// Additional repositories included when dev mode is on.
pub const DEV_REPOS: &[&str] = &[
    "cloudify-fabric-plugin",
    "cloudify-system-tests",
    "cloudify-dev",
];

/// Full catalogue in canonical order: core first, then dev.
pub fn all_repos() -> impl Iterator<Item = &'static str> {
    CORE_REPOS.iter().chain(DEV_REPOS.iter()).copied()
}

/// The resolved `repo -> ref` mapping for one invocation.
///
/// Backed by a vector built by scanning the catalogue, so iteration order
/// is always catalogue order restricted to the keys present and keys are
/// unique by construction. The set is resolved once, up front, and treated
/// as read-only by every operation that consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSet {
    entries: Vec<(String, String)>,
}

impl RepoSet {
    /// Resolve the working set for this invocation.
    ///
    /// Without a requirements listing the set is the whole catalogue
    /// (core-only unless `dev`), every repo pinned to `default_branch`.
    ///
    /// A requirements listing has one repo per line, either `name` or
    /// `name@ref`; a line without an explicit ref inherits
    /// `default_branch`. The set is then rebuilt by scanning the full
    /// catalogue in order and keeping only the repos named, so the line
    /// order of the listing never matters. Names not in the catalogue are
    /// silently dropped.
    pub fn resolve(default_branch: &str, dev: bool, requirements: Option<&str>) -> Self {
        let entries: Vec<(String, String)> = match requirements {
            Some(listing) => {
                let pinned = parse_requirements(listing, default_branch);
                all_repos()
                    .filter_map(|repo| {
                        pinned
                            .iter()
                            .find(|(name, _)| name == repo)
                            .map(|(_, branch)| (repo.to_string(), branch.clone()))
                    })
                    .collect()
            }
            None => {
                let repos: Vec<&str> = if dev {
                    all_repos().collect()
                } else {
                    CORE_REPOS.to_vec()
                };
                repos
                    .into_iter()
                    .map(|repo| (repo.to_string(), default_branch.to_string()))
                    .collect()
            }
        };

        log::debug!("resolved {} repos", entries.len());
        Self { entries }
    }

    /// Rewrite every entry still pinned to `default_branch` to `branch`.
    ///
    /// Entries carrying an explicit ref (pinned by a requirements line)
    /// are left untouched: a per-repo pin always wins over a global branch
    /// switch.
    pub fn apply_branch(&mut self, branch: &str, default_branch: &str) {
        if branch == default_branch {
            return;
        }
        for (_, repo_branch) in &mut self.entries {
            if repo_branch == default_branch {
                *repo_branch = branch.to_string();
            }
        }
    }

    /// Iterate entries in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(repo, branch)| (repo.as_str(), branch.as_str()))
    }

    pub fn get(&self, repo: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == repo)
            .map(|(_, branch)| branch.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a requirements listing into unordered `(repo, ref)` pairs.
///
/// Blank lines are skipped; surrounding whitespace is trimmed. A repeated
/// repo name keeps the last ref given for it.
fn parse_requirements(listing: &str, default_branch: &str) -> Vec<(String, String)> {
    let mut pinned: Vec<(String, String)> = Vec::new();
    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (repo, branch) = match line.split_once('@') {
            Some((repo, branch)) => (repo.to_string(), branch.to_string()),
            None => (line.to_string(), default_branch.to_string()),
        };
        pinned.retain(|(name, _)| *name != repo);
        pinned.push((repo, branch));
    }
    pinned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_full_catalogue_on_default_branch() {
        let repos = RepoSet::resolve(MASTER, true, None);
        assert_eq!(repos.len(), CORE_REPOS.len() + DEV_REPOS.len());
        assert!(repos.iter().all(|(_, branch)| branch == MASTER));

        let names: Vec<&str> = repos.iter().map(|(repo, _)| repo).collect();
        let expected: Vec<&str> = all_repos().collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn core_only_without_dev() {
        let repos = RepoSet::resolve(MASTER, false, None);
        let names: Vec<&str> = repos.iter().map(|(repo, _)| repo).collect();
        assert_eq!(names, CORE_REPOS.to_vec());
        assert_eq!(repos.get("cloudify-dev"), None);
    }

    #[test]
    fn requirements_reimpose_catalogue_order() {
        // Listed in reverse catalogue order on purpose.
        let listing = "cloudify-cli\ncloudify-agent\ncloudify-rest-client\n";
        let repos = RepoSet::resolve(MASTER, true, Some(listing));
        let names: Vec<&str> = repos.iter().map(|(repo, _)| repo).collect();
        assert_eq!(
            names,
            vec!["cloudify-rest-client", "cloudify-agent", "cloudify-cli"]
        );
    }

    #[test]
    fn requirements_pin_explicit_refs() {
        let listing = "cloudify-cli@4.2\ncloudify-agent\n";
        let repos = RepoSet::resolve(MASTER, true, Some(listing));
        assert_eq!(repos.get("cloudify-cli"), Some("4.2"));
        assert_eq!(repos.get("cloudify-agent"), Some(MASTER));
    }

    #[test]
    fn unknown_repos_are_silently_dropped() {
        let listing = "not-a-cloudify-repo\ncloudify-cli\n";
        let repos = RepoSet::resolve(MASTER, true, Some(listing));
        assert_eq!(repos.len(), 1);
        assert_eq!(repos.get("cloudify-cli"), Some(MASTER));
    }

    #[test]
    fn blank_lines_and_whitespace_ignored() {
        let listing = "\n  cloudify-cli  \n\n  cloudify-agent@1.0\n";
        let repos = RepoSet::resolve(MASTER, true, Some(listing));
        assert_eq!(repos.len(), 2);
        assert_eq!(repos.get("cloudify-agent"), Some("1.0"));
    }

    #[test]
    fn branch_argument_only_touches_default_entries() {
        let listing = "cloudify-dsl-parser@v2\ncloudify-rest-client\n";
        let mut repos = RepoSet::resolve(MASTER, true, Some(listing));
        repos.apply_branch("release", MASTER);
        assert_eq!(repos.get("cloudify-dsl-parser"), Some("v2"));
        assert_eq!(repos.get("cloudify-rest-client"), Some("release"));
    }

    #[test]
    fn branch_argument_equal_to_default_is_a_noop() {
        let mut repos = RepoSet::resolve(MASTER, true, None);
        let before = repos.clone();
        repos.apply_branch(MASTER, MASTER);
        assert_eq!(repos, before);
    }

    #[test]
    fn requirements_from_a_file_on_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "cloudify-manager@5.0").expect("write");
        writeln!(file, "docl").expect("write");

        let listing = std::fs::read_to_string(file.path()).expect("read");
        let repos = RepoSet::resolve(MASTER, true, Some(&listing));
        assert_eq!(repos.get("cloudify-manager"), Some("5.0"));
        assert_eq!(repos.get("docl"), Some(MASTER));
    }
}
