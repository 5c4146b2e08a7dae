//! # Submodule Synchronization
//!
//! The `Orchestrator` sequences submodule enumeration and git commands into
//! the pull, reset and push workflows, plus the superproject-level pulls
//! and pushes they are composed with.
//!
//! ## Workflows
//!
//! - **pull-submodules**: refuses to run while any submodule has
//!   uncommitted changes, then updates every checkout to the commit the
//!   superproject records (recursively) and fast-forwards every ordinary
//!   local branch from its upstream. A branch that cannot be fast-forwarded
//!   fails the run; nothing is ever merged or rebased.
//! - **reset-submodules**: destructive and unconfirmed. Fetches everything,
//!   detaches at the remote default branch, force-deletes every local
//!   branch (`master` and `stable` included) and removes untracked and
//!   ignored files.
//! - **push-submodules**: force-pushes all branches and pushes all tags of
//!   every submodule to its own remote.
//! - **push-repo** / **pull-repo** / **pull-lfs**: act on the superproject
//!   itself. `push-repo` never forces.
//!
//! Every workflow stops at the first failing command and leaves whatever
//! already happened in place.

use log::info;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::git;
use crate::output;
use crate::plan::SyncPlan;
use crate::submodule::{self, Submodule};

/// Runs sync workflows against one superproject
pub struct Orchestrator<'c, 'r> {
    ctx: &'c Context<'r>,
}

impl<'c, 'r> Orchestrator<'c, 'r> {
    pub fn new(ctx: &'c Context<'r>) -> Self {
        Self { ctx }
    }

    /// Enumerates and inspects the submodules as they are right now.
    pub fn submodules(&self) -> Result<Vec<Submodule>> {
        submodule::discover(self.ctx.runner, self.ctx.root(), &self.ctx.settings)
    }

    fn run_plan(&self, plan: &SyncPlan) -> Result<()> {
        if plan.is_empty() {
            output::note(&self.ctx.output, "no initialized submodules, nothing to do");
            return Ok(());
        }
        for line in plan.render() {
            log::debug!("planned: {}", line);
        }
        plan.execute(
            self.ctx.runner,
            self.ctx.root(),
            &self.ctx.settings,
            &self.ctx.output,
        )
    }

    /// Fails with every unclean submodule named, before anything is touched.
    pub fn ensure_clean(&self, submodules: &[Submodule]) -> Result<()> {
        let unclean: Vec<_> = submodules
            .iter()
            .filter(|s| !s.is_clean())
            .map(|s| s.path.clone())
            .collect();
        if unclean.is_empty() {
            Ok(())
        } else {
            Err(Error::UncleanSubmodules { paths: unclean })
        }
    }

    pub fn pull_submodules(&self) -> Result<()> {
        let out = &self.ctx.output;
        output::step(out, "Checking submodule working trees");
        self.ensure_clean(&self.submodules()?)?;

        output::step(out, "Updating submodules to the recorded commits");
        info!("updating submodule checkouts in {}", self.ctx.root().display());
        self.ctx
            .runner
            .run_checked(&git::submodule_update(self.ctx.root()))?;

        // re-enumerate: the update may have checked out new submodules
        let plan = SyncPlan::pull(&self.submodules()?);
        self.run_plan(&plan)?;
        output::done(out, "Submodules pulled");
        Ok(())
    }

    pub fn reset_submodules(&self) -> Result<()> {
        let plan = SyncPlan::reset(&self.submodules()?);
        info!("resetting submodules ({} steps)", plan.len());
        self.run_plan(&plan)?;
        output::done(&self.ctx.output, "Submodules reset to their remotes");
        Ok(())
    }

    pub fn push_submodules(&self) -> Result<()> {
        let plan = SyncPlan::push(&self.submodules()?);
        self.run_plan(&plan)?;
        output::done(&self.ctx.output, "Submodules pushed");
        Ok(())
    }

    pub fn push_repo(&self) -> Result<()> {
        output::step(&self.ctx.output, "Pushing the superproject");
        self.ctx.runner.run_checked(&git::push(self.ctx.root()))?;
        output::done(&self.ctx.output, "Superproject pushed");
        Ok(())
    }

    pub fn pull_repo(&self) -> Result<()> {
        output::step(&self.ctx.output, "Fast-forwarding the superproject");
        self.ctx
            .runner
            .run_checked(&git::pull_ff_only(self.ctx.root()))?;
        Ok(())
    }

    pub fn pull_lfs(&self) -> Result<()> {
        output::step(&self.ctx.output, "Fetching LFS objects");
        self.ctx.runner.run_checked(&git::lfs_pull(self.ctx.root()))?;
        Ok(())
    }

    /// `pull-repo`, then `pull-lfs`, then `pull-submodules`.
    pub fn pull(&self) -> Result<()> {
        self.pull_repo()?;
        self.pull_lfs()?;
        self.pull_submodules()
    }
}
