//! Sync plans: the ordered per-submodule operations of one workflow run.
//!
//! A plan is built from a fresh enumeration, optionally shown to the
//! operator, executed once and dropped. Uninitialized submodules never get
//! steps.

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::Settings;
use crate::error::Result;
use crate::git;
use crate::output::{self, OutputConfig};
use crate::runner::{CommandRunner, Invocation};
use crate::submodule::Submodule;

/// One thing to do inside a submodule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Check out an ordinary branch and fast-forward it from its upstream.
    FastForward { branch: String },
    /// Fetch all remote refs and tags, pruning stale ones.
    FetchAll,
    /// Detach HEAD at the remote default branch tip.
    DetachAtRemoteHead,
    /// Force-delete a local branch.
    DeleteBranch { branch: String },
    /// Remove untracked and ignored files.
    Clean,
    /// Force-push every local branch.
    PushBranches,
    PushTags,
}

impl Operation {
    /// The commands that carry out this operation in `dir`.
    pub fn invocations(&self, dir: &Path, settings: &Settings) -> Vec<Invocation> {
        match self {
            Operation::FastForward { branch } => {
                vec![git::checkout(dir, branch), git::pull_ff_only(dir)]
            }
            Operation::FetchAll => vec![git::fetch_all(dir)],
            Operation::DetachAtRemoteHead => vec![
                git::set_remote_head(dir, &settings.remote),
                git::detach_at_remote_head(dir, &settings.remote),
            ],
            Operation::DeleteBranch { branch } => vec![git::delete_branch(dir, branch)],
            Operation::Clean => vec![git::clean_all(dir)],
            Operation::PushBranches => vec![git::push_all_branches_forced(dir, &settings.remote)],
            Operation::PushTags => vec![git::push_tags(dir, &settings.remote)],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::FastForward { branch } => write!(f, "fast-forward {}", branch),
            Operation::FetchAll => write!(f, "fetch all refs and tags"),
            Operation::DetachAtRemoteHead => write!(f, "detach at remote default branch"),
            Operation::DeleteBranch { branch } => write!(f, "delete branch {}", branch),
            Operation::Clean => write!(f, "remove untracked and ignored files"),
            Operation::PushBranches => write!(f, "force-push all branches"),
            Operation::PushTags => write!(f, "push tags"),
        }
    }
}

/// An operation bound to the submodule it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// Submodule path relative to the superproject root
    pub submodule: PathBuf,
    pub operation: Operation,
}

/// An ordered list of steps for one workflow run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub steps: Vec<PlannedStep>,
}

impl SyncPlan {
    fn build<F>(submodules: &[Submodule], mut operations: F) -> Self
    where
        F: FnMut(&Submodule) -> Vec<Operation>,
    {
        let steps = submodules
            .iter()
            .filter(|s| s.is_initialized())
            .flat_map(|s| {
                operations(s).into_iter().map(|operation| PlannedStep {
                    submodule: s.path.clone(),
                    operation,
                })
            })
            .collect();
        Self { steps }
    }

    /// Fast-forward every ordinary branch; protected branches are left alone.
    pub fn pull(submodules: &[Submodule]) -> Self {
        Self::build(submodules, |s| {
            s.ordinary_branches()
                .map(|b| Operation::FastForward {
                    branch: b.name.clone(),
                })
                .collect()
        })
    }

    /// Start every submodule over from its remote.
    ///
    /// Every local branch is deleted, protected ones included.
    pub fn reset(submodules: &[Submodule]) -> Self {
        Self::build(submodules, |s| {
            let mut operations = vec![Operation::FetchAll, Operation::DetachAtRemoteHead];
            operations.extend(s.branches.iter().map(|b| Operation::DeleteBranch {
                branch: b.name.clone(),
            }));
            operations.push(Operation::Clean);
            operations
        })
    }

    pub fn push(submodules: &[Submodule]) -> Self {
        Self::build(submodules, |_| vec![Operation::PushBranches, Operation::PushTags])
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// One line per step, for logs and dry runs.
    pub fn render(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| format!("{}: {}", step.submodule.display(), step.operation))
            .collect()
    }

    /// Runs every step in order, stopping at the first failure.
    ///
    /// Steps already run stay applied; there is no rollback across
    /// independent repositories.
    pub fn execute(
        &self,
        runner: &dyn CommandRunner,
        root: &Path,
        settings: &Settings,
        out: &OutputConfig,
    ) -> Result<()> {
        let mut current: Option<&Path> = None;
        for step in &self.steps {
            if current != Some(step.submodule.as_path()) {
                output::step(out, &step.submodule.display().to_string());
                current = Some(step.submodule.as_path());
            }
            info!("{}: {}", step.submodule.display(), step.operation);
            let dir = root.join(&step.submodule);
            for invocation in step.operation.invocations(&dir, settings) {
                runner.run_checked(&invocation)?;
            }
        }
        Ok(())
    }
}
