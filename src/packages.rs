//! Derivation of installable packages from a resolved repo set.

use crate::catalogue::RepoSet;

const MANAGER_REPO: &str = "cloudify-manager";

/// Repos that never map to an installable package.
const NOT_INSTALLABLE: &[&str] = &["cloudify-manager-blueprints", "cloudify-dev"];

/// Sub-packages living inside the manager repository checkout.
const MANAGER_PACKAGES: &[(&str, &str)] = &[
    ("cloudify-rest-service", "cloudify-manager/rest-service"),
    ("cloudify-integration-tests", "cloudify-manager/tests"),
    ("cloudify-system-workflows", "cloudify-manager/workflows"),
];

/// An installable unit: a package name and its path relative to the repo
/// base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub path: String,
}

impl Package {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// Derive the installable packages for a repo set.
///
/// Each repo maps to a package whose name and path are the repo name,
/// except that placeholder repos are dropped and the manager repo is
/// replaced by its three sub-packages. The sub-packages are appended after
/// the main pass; that placement is the contract here, not an accident of
/// map ordering.
pub fn derive_packages(repos: &RepoSet) -> Vec<Package> {
    let mut packages: Vec<Package> = repos
        .iter()
        .map(|(repo, _)| repo)
        .filter(|repo| *repo != MANAGER_REPO && !NOT_INSTALLABLE.contains(repo))
        .map(|repo| Package::new(repo, repo))
        .collect();

    if repos.get(MANAGER_REPO).is_some() {
        for &(name, path) in MANAGER_PACKAGES {
            packages.push(Package::new(name, path));
        }
    }

    packages
}
