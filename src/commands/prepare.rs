//! # Prepare and All Commands
//!
//! - `prepare` = `update`, `stage`, `commit`
//! - `all` = `prepare`, `push-submodules`, `push-repo`
//!
//! Both stop at the first failing stage. An empty commit is not a failure,
//! so `all` still pushes when the update changed nothing.

use anyhow::Result;
use clap::Args;

use chronicle::pipeline::{CommitOutcome, Pipeline};

use super::{GlobalOptions, Session};

/// Arguments shared by `prepare` and `all`
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Only update this model (passed through to the update script)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

pub fn execute_prepare(args: PrepareArgs, globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    let outcome = Pipeline::new(&ctx).prepare(args.model.as_deref())?;
    log::info!(
        "prepare finished: {}",
        match outcome {
            CommitOutcome::Committed => "committed",
            CommitOutcome::NothingToCommit => "nothing to commit",
        }
    );
    Ok(())
}

pub fn execute_all(args: PrepareArgs, globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Pipeline::new(&ctx).all(args.model.as_deref())?;
    Ok(())
}
