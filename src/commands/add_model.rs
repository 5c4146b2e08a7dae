//! # Add Model Command
//!
//! Registers `models/<MODEL>/repo` as a submodule cloned from `REPO_URL`,
//! after attaching the URL as the repository's `origin`.
//!
//! Both parameters are optional at the `clap` level so that a missing one
//! produces a descriptive error (exit code 1) rather than a usage error.
//! They can also come from the `MODEL` and `REPO_URL` environment
//! variables.

use anyhow::Result;
use clap::Args;

use chronicle::models;

use super::{GlobalOptions, Session};

/// Register a model's SDK history repository as a submodule
#[derive(Args, Debug)]
pub struct AddModelArgs {
    /// Device model identifier, e.g. RUT950
    #[arg(long, value_name = "MODEL", env = "MODEL")]
    pub model: Option<String>,

    /// URL of the model's published SDK history repository
    #[arg(long, value_name = "URL", env = "REPO_URL")]
    pub repo_url: Option<String>,
}

pub fn execute(args: AddModelArgs, globals: &GlobalOptions) -> Result<()> {
    // reject bad parameters before touching the superproject at all
    models::validate_model(args.model.as_deref())?;
    models::validate_repo_url(args.repo_url.as_deref())?;

    let session = Session::open(globals)?;
    let ctx = session.context();
    models::add_model(&ctx, args.model.as_deref(), args.repo_url.as_deref())?;
    Ok(())
}
