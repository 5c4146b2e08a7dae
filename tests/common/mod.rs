//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to the test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! #[cfg_attr(not(feature = "integration-tests"), ignore)]
//! fn test_example() {
//!     let fixture = GitFixture::new().with_model("RUT950");
//!     fixture.command().arg("status").assert().success();
//! }
//! ```
//!
//! `GitFixture` builds real repositories with the system `git`: a bare
//! remote per model, a bare remote for the superproject, and a
//! superproject checkout with the models registered as submodules. Git is
//! isolated from the user's configuration through `GIT_CONFIG_GLOBAL` and
//! `GIT_CONFIG_NOSYSTEM`.

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::{git, git_output, GitFixture, TestFixture};
}

/// Environment every git and chronicle process in a fixture runs with.
fn git_env(gitconfig: &Path) -> Vec<(&'static str, String)> {
    vec![
        ("GIT_CONFIG_GLOBAL", gitconfig.display().to_string()),
        ("GIT_CONFIG_NOSYSTEM", "1".to_string()),
        ("GIT_TERMINAL_PROMPT", "0".to_string()),
    ]
}

/// Runs git in `dir` and panics with its stderr if it fails.
pub fn git(gitconfig: &Path, dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(git_env(gitconfig))
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Runs git in `dir` and returns its trimmed stdout.
pub fn git_output(gitconfig: &Path, dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(git_env(gitconfig))
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A temporary directory for tests that need no git repositories.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A chronicle command rooted at this fixture, with the build-tool
    /// parameter variables cleared.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chronicle");
        cmd.current_dir(self.path())
            .env_remove("MODEL")
            .env_remove("REPO_URL")
            .env_remove("CHRONICLE_ROOT")
            .env_remove("CHRONICLE_CONFIG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A superproject with per-model submodules backed by local bare remotes.
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
    models: Vec<String>,
}

impl GitFixture {
    /// Creates the superproject and its bare remote, with one commit pushed.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("gitconfig")
            .write_str(
                "[user]\n\tname = Chronicle Tests\n\temail = tests@example.com\n\
                 [init]\n\tdefaultBranch = master\n\
                 [protocol \"file\"]\n\tallow = always\n\
                 [advice]\n\tdetachedHead = false\n",
            )
            .expect("Failed to write gitconfig");

        let fixture = Self {
            temp_dir,
            models: Vec::new(),
        };

        let remotes = fixture.path().join("remotes");
        std::fs::create_dir_all(&remotes).expect("Failed to create remotes dir");
        fixture.git(&remotes, &["init", "--bare", "superproject.git"]);

        let sp = fixture.superproject();
        std::fs::create_dir_all(&sp).expect("Failed to create superproject dir");
        fixture.git(&sp, &["init"]);
        std::fs::write(sp.join("README.md"), "# SDK history\n").expect("Failed to write README");
        fixture.git(&sp, &["add", "-A"]);
        fixture.git(&sp, &["commit", "-m", "Initial commit"]);
        let url = fixture.remote_path("superproject").display().to_string();
        fixture.git(&sp, &["remote", "add", "origin", &url]);
        fixture.git(&sp, &["push", "-u", "origin", "master"]);
        fixture
    }

    /// Adds a model: a bare remote with `master`, `stable` and `v7.6`, and
    /// a submodule at `models/<model>/repo` tracking it, committed and
    /// pushed in the superproject.
    pub fn with_model(mut self, model: &str) -> Self {
        let seed = self.seed_path(model);
        std::fs::create_dir_all(&seed).expect("Failed to create seed dir");
        self.git(&seed, &["init"]);
        std::fs::write(seed.join("VERSION"), "7.4\n").expect("Failed to write VERSION");
        self.git(&seed, &["add", "-A"]);
        self.git(&seed, &["commit", "-m", "SDK 7.4"]);
        self.git(&seed, &["branch", "stable"]);
        self.git(&seed, &["branch", "v7.6"]);

        let remotes = self.path().join("remotes");
        let bare = format!("{}.git", model);
        self.git(&remotes, &["init", "--bare", &bare]);
        let url = self.remote_path(model).display().to_string();
        self.git(&seed, &["remote", "add", "origin", &url]);
        self.git(&seed, &["push", "origin", "--all"]);

        let sp = self.superproject();
        let path = format!("models/{}/repo", model);
        self.git(&sp, &["submodule", "add", &url, &path]);
        self.git(&sp, &["commit", "-m", &format!("Add {}", model)]);
        self.git(&sp, &["push"]);

        self.models.push(model.to_string());
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn gitconfig(&self) -> PathBuf {
        self.path().join("gitconfig")
    }

    pub fn superproject(&self) -> PathBuf {
        self.path().join("superproject")
    }

    /// The model's submodule checkout inside the superproject.
    pub fn submodule(&self, model: &str) -> PathBuf {
        self.superproject().join("models").join(model).join("repo")
    }

    /// The bare remote for a model, or `superproject`.
    pub fn remote_path(&self, name: &str) -> PathBuf {
        self.path().join("remotes").join(format!("{}.git", name))
    }

    /// A separate working clone used to publish new upstream commits.
    pub fn seed_path(&self, model: &str) -> PathBuf {
        self.path().join("seeds").join(model)
    }

    pub fn git(&self, dir: &Path, args: &[&str]) {
        git(&self.gitconfig(), dir, args)
    }

    pub fn git_output(&self, dir: &Path, args: &[&str]) -> String {
        git_output(&self.gitconfig(), dir, args)
    }

    /// Commits a new SDK version on `branch` upstream and returns its hash.
    pub fn publish(&self, model: &str, branch: &str, version: &str) -> String {
        let seed = self.seed_path(model);
        self.git(&seed, &["checkout", branch]);
        std::fs::write(seed.join("VERSION"), format!("{}\n", version)).expect("Failed to write VERSION");
        self.git(&seed, &["commit", "-am", &format!("SDK {}", version)]);
        self.git(&seed, &["push", "origin", branch]);
        self.git_output(&seed, &["rev-parse", "HEAD"])
    }

    /// Local branch names of a repository.
    pub fn branches(&self, dir: &Path) -> Vec<String> {
        let listing = self.git_output(dir, &["for-each-ref", "--format=%(refname:lstrip=2)", "refs/heads/"]);
        listing.lines().map(str::to_string).collect()
    }

    /// A chronicle command rooted at the superproject with isolated git.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chronicle");
        cmd.current_dir(self.superproject())
            .envs(git_env(&self.gitconfig()))
            .env_remove("MODEL")
            .env_remove("REPO_URL")
            .env_remove("CHRONICLE_ROOT")
            .env_remove("CHRONICLE_CONFIG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}
