//! Push commands.
//!
//! `push-submodules` force-pushes every submodule's branches and pushes its
//! tags to the submodule's own remote. `push-repo` pushes the superproject
//! without forcing.

use anyhow::Result;

use chronicle::sync::Orchestrator;

use super::{GlobalOptions, Session};

pub fn execute_submodules(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Orchestrator::new(&ctx).push_submodules()?;
    Ok(())
}

pub fn execute_repo(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Orchestrator::new(&ctx).push_repo()?;
    Ok(())
}
