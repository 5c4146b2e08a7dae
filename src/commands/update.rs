//! # Update, Stage and Commit Commands
//!
//! The three building blocks of `prepare`:
//!
//! - `update [MODEL]` runs the metadata/SDK fetch script in the superproject
//!   root, optionally for a single model.
//! - `stage` stages every change in the superproject, submodule pointers
//!   included.
//! - `commit` commits with the configured message, or reports "nothing to
//!   commit" and succeeds.

use anyhow::Result;
use clap::Args;

use chronicle::pipeline::Pipeline;

use super::{GlobalOptions, Session};

/// Run the metadata/SDK update script
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Only update this model (passed through to the script)
    #[arg(value_name = "MODEL")]
    pub model: Option<String>,
}

pub fn execute(args: UpdateArgs, globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Pipeline::new(&ctx).update(args.model.as_deref())?;
    Ok(())
}

pub fn execute_stage(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Pipeline::new(&ctx).stage()?;
    Ok(())
}

pub fn execute_commit(globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    Pipeline::new(&ctx).commit()?;
    Ok(())
}
