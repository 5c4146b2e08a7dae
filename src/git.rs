//! Git subcommands used by the workflows.
//!
//! Mutations are exposed as [`Invocation`] builders so that workflows can
//! plan them before running them. Queries whose output needs interpreting
//! run immediately through a [`CommandRunner`].
//!
//! All commands use the system `git`, which picks up SSH keys, credential
//! helpers and anything else configured in `~/.gitconfig`.

use std::path::Path;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

/// `git submodule update --init --recursive`
pub fn submodule_update(root: &Path) -> Invocation {
    Invocation::git(root).args(["submodule", "update", "--init", "--recursive"])
}

pub fn checkout(dir: &Path, branch: &str) -> Invocation {
    Invocation::git(dir).args(["checkout", branch])
}

/// Fast-forwards the current branch from its upstream, never merging.
pub fn pull_ff_only(dir: &Path) -> Invocation {
    Invocation::git(dir).args(["pull", "--ff-only"])
}

/// Fetches every remote's branches and tags, pruning refs gone upstream.
pub fn fetch_all(dir: &Path) -> Invocation {
    Invocation::git(dir).args(["fetch", "--all", "--tags", "--prune"])
}

/// Refreshes `refs/remotes/<remote>/HEAD` from the remote's default branch.
pub fn set_remote_head(dir: &Path, remote: &str) -> Invocation {
    Invocation::git(dir).args(["remote", "set-head", remote, "--auto"])
}

/// Detaches HEAD at the tip of `<remote>`'s default branch, discarding
/// local modifications to tracked files.
pub fn detach_at_remote_head(dir: &Path, remote: &str) -> Invocation {
    Invocation::git(dir).args(["checkout", "--force", "--detach", &format!("{}/HEAD", remote)])
}

pub fn delete_branch(dir: &Path, branch: &str) -> Invocation {
    Invocation::git(dir).args(["branch", "-D", branch])
}

/// Removes untracked and ignored files, including nested repositories.
pub fn clean_all(dir: &Path) -> Invocation {
    Invocation::git(dir).args(["clean", "-ffdx"])
}

pub fn push_all_branches_forced(dir: &Path, remote: &str) -> Invocation {
    Invocation::git(dir).args(["push", "--force", "--all", remote])
}

pub fn push_tags(dir: &Path, remote: &str) -> Invocation {
    Invocation::git(dir).args(["push", "--tags", remote])
}

/// Plain `git push` of the current branch to its upstream.
pub fn push(dir: &Path) -> Invocation {
    Invocation::git(dir).arg("push")
}

pub fn lfs_pull(dir: &Path) -> Invocation {
    Invocation::git(dir).args(["lfs", "pull"])
}

pub fn add_all(dir: &Path) -> Invocation {
    Invocation::git(dir).args(["add", "-A"])
}

pub fn commit(dir: &Path, message: &str) -> Invocation {
    Invocation::git(dir).args(["commit", "-m", message])
}

pub fn remote_add(dir: &Path, name: &str, url: &str) -> Invocation {
    Invocation::git(dir).args(["remote", "add", name, url])
}

/// Registers `path` (relative to `root`) as a submodule cloned from `url`.
pub fn submodule_add(root: &Path, url: &str, path: &str) -> Invocation {
    Invocation::git(root).args(["submodule", "add", url, path])
}

/// Returns `true` if `dir` is the top level of its own working tree.
///
/// A submodule that has not been checked out yet is an empty directory
/// inside the superproject's working tree; git commands run there would
/// silently operate on the superproject instead.
pub fn is_worktree_root(runner: &dyn CommandRunner, dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let output = runner.run(&Invocation::git(dir).args(["rev-parse", "--show-prefix"]).query())?;
    Ok(output.success() && output.stdout.trim().is_empty())
}

/// Returns `true` if the working tree in `dir` has no uncommitted changes,
/// counting untracked files as changes.
pub fn is_clean(runner: &dyn CommandRunner, dir: &Path) -> Result<bool> {
    let output = runner.run_checked(&Invocation::git(dir).args(["status", "--porcelain"]).query())?;
    Ok(output.stdout.trim().is_empty())
}

/// Lists local branch names in `dir`.
///
/// Names are the full ref minus `refs/heads/`. `%(refname:short)` would
/// print `heads/<name>` when a tag shares the branch's name.
pub fn local_branches(runner: &dyn CommandRunner, dir: &Path) -> Result<Vec<String>> {
    let output = runner.run_checked(
        &Invocation::git(dir)
            .args(["for-each-ref", "--format=%(refname:lstrip=2)", "refs/heads/"])
            .query(),
    )?;
    Ok(output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Returns `true` if the index differs from `HEAD`.
pub fn has_staged_changes(runner: &dyn CommandRunner, dir: &Path) -> Result<bool> {
    let invocation = Invocation::git(dir).args(["diff", "--cached", "--quiet"]).query();
    let output = runner.run(&invocation)?;
    match output.code {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(Error::CommandFailed {
            command: invocation.command_line(),
            cwd: invocation.cwd.clone(),
            status: output.status_description(),
            stderr: output.stderr,
        }),
    }
}

/// Reads the `path` and `url` entries of `root/.gitmodules`.
///
/// Returns the raw `git config --get-regexp` listing; an absent file or a
/// file without submodules yields an empty string.
pub fn submodule_config(runner: &dyn CommandRunner, root: &Path) -> Result<String> {
    if !root.join(".gitmodules").is_file() {
        return Ok(String::new());
    }
    let invocation = Invocation::git(root)
        .args([
            "config",
            "--file",
            ".gitmodules",
            "--get-regexp",
            r"^submodule\..*\.(path|url)$",
        ])
        .query();
    let output = runner.run(&invocation)?;
    match output.code {
        Some(0) => Ok(output.stdout),
        // no matching keys
        Some(1) => Ok(String::new()),
        _ => Err(Error::CommandFailed {
            command: invocation.command_line(),
            cwd: invocation.cwd.clone(),
            status: output.status_description(),
            stderr: output.stderr,
        }),
    }
}
