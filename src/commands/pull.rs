//! Pull commands: `pull-repo`, `pull-lfs`, `pull-submodules` and `pull`,
//! which runs the three in that order.

use anyhow::Result;

use chronicle::sync::Orchestrator;

use super::{GlobalOptions, Session};

pub fn execute_repo(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Orchestrator::new(&ctx).pull_repo()?;
    Ok(())
}

pub fn execute_lfs(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Orchestrator::new(&ctx).pull_lfs()?;
    Ok(())
}

pub fn execute_submodules(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Orchestrator::new(&ctx).pull_submodules()?;
    Ok(())
}

pub fn execute(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Orchestrator::new(&ctx).pull()?;
    Ok(())
}
