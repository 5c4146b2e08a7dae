//! # Reset Submodules Command
//!
//! Throws away all local state in every submodule: local branches (all of
//! them, `master` and `stable` included), uncommitted changes, untracked and
//! ignored files. Each submodule ends up detached at its remote's default
//! branch.
//!
//! There is no confirmation prompt. Use `--dry-run` to see the commands
//! first.

use anyhow::Result;

use chronicle::sync::Orchestrator;

use super::{GlobalOptions, Session};

pub fn execute(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Orchestrator::new(&ctx).reset_submodules()?;
    Ok(())
}
