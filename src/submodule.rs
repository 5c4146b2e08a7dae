//! # Submodule Enumeration
//!
//! Discovers the superproject's submodules from `.gitmodules` and inspects
//! each one: whether it is checked out, whether its working tree is clean,
//! and which local branches it has. Nothing here mutates a repository, and
//! nothing is cached; each workflow enumerates afresh.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

use crate::config::Settings;
use crate::error::Result;
use crate::git;
use crate::runner::CommandRunner;

/// A submodule as declared in `.gitmodules`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// Path relative to the superproject root
    pub path: PathBuf,
    pub url: Option<String>,
}

/// State of a submodule's working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkTree {
    Clean,
    Dirty,
    /// Declared but not checked out; per-submodule steps skip it.
    Uninitialized,
}

/// A local branch inside a submodule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
    /// Protected branches are never fast-forwarded by the pull workflow.
    pub protected: bool,
}

impl Branch {
    pub fn classify(name: &str, settings: &Settings) -> Self {
        Self {
            name: name.to_string(),
            protected: settings.is_protected(name),
        }
    }
}

/// A submodule with its inspected state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submodule {
    pub name: String,
    pub path: PathBuf,
    pub url: Option<String>,
    pub state: WorkTree,
    pub branches: Vec<Branch>,
}

impl Submodule {
    pub fn is_initialized(&self) -> bool {
        self.state != WorkTree::Uninitialized
    }

    /// Uninitialized submodules have nothing to lose and count as clean.
    pub fn is_clean(&self) -> bool {
        self.state != WorkTree::Dirty
    }

    /// Working directory of this submodule under `root`.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }

    pub fn ordinary_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| !b.protected)
    }
}

// the name may itself contain dots, so match greedily up to the last key
const LISTING_PATTERN: &str = r"^submodule\.(?P<name>.+)\.(?P<key>path|url) (?P<value>.*)$";

/// Parses `git config --get-regexp` output for submodule `path`/`url` keys.
///
/// Declarations keep the order in which names first appear. Entries
/// without a `path` cannot be located and are dropped.
pub fn parse_declarations(listing: &str) -> Result<Vec<Declaration>> {
    let pattern = Regex::new(LISTING_PATTERN)?;
    let mut order: Vec<String> = Vec::new();
    let mut paths: Vec<Option<String>> = Vec::new();
    let mut urls: Vec<Option<String>> = Vec::new();

    for line in listing.lines() {
        let Some(caps) = pattern.captures(line.trim_end_matches('\r')) else {
            continue;
        };
        let name = &caps["name"];
        let index = match order.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                order.push(name.to_string());
                paths.push(None);
                urls.push(None);
                order.len() - 1
            }
        };
        let value = caps["value"].trim().to_string();
        match &caps["key"] {
            "path" => paths[index] = Some(value),
            _ => urls[index] = Some(value),
        }
    }

    Ok(order
        .into_iter()
        .zip(paths)
        .zip(urls)
        .filter_map(|((name, path), url)| match path {
            Some(path) if !path.is_empty() => Some(Declaration {
                name,
                path: PathBuf::from(path),
                url,
            }),
            _ => {
                warn!("submodule '{}' has no path in .gitmodules, ignoring it", name);
                None
            }
        })
        .collect())
}

/// Lists the superproject's declared submodules without inspecting them.
pub fn declarations(runner: &dyn CommandRunner, root: &Path) -> Result<Vec<Declaration>> {
    let listing = git::submodule_config(runner, root)?;
    parse_declarations(&listing)
}

/// Inspects one declared submodule.
pub fn inspect(
    runner: &dyn CommandRunner,
    root: &Path,
    declaration: Declaration,
    settings: &Settings,
) -> Result<Submodule> {
    let dir = root.join(&declaration.path);
    let (state, branches) = if !git::is_worktree_root(runner, &dir)? {
        debug!("{} is not checked out", declaration.path.display());
        (WorkTree::Uninitialized, Vec::new())
    } else {
        let state = if git::is_clean(runner, &dir)? {
            WorkTree::Clean
        } else {
            WorkTree::Dirty
        };
        let branches = git::local_branches(runner, &dir)?
            .iter()
            .map(|name| Branch::classify(name, settings))
            .collect();
        (state, branches)
    };

    Ok(Submodule {
        name: declaration.name,
        path: declaration.path,
        url: declaration.url,
        state,
        branches,
    })
}

/// Discovers and inspects every submodule of the superproject at `root`.
pub fn discover(
    runner: &dyn CommandRunner,
    root: &Path,
    settings: &Settings,
) -> Result<Vec<Submodule>> {
    declarations(runner, root)?
        .into_iter()
        .map(|declaration| inspect(runner, root, declaration, settings))
        .collect()
}
