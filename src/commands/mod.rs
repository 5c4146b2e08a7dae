//! # CLI Command Implementations
//!
//! One module per group of related subcommands. Commands that take
//! arguments define an `Args` struct derived with `clap`; each exposes
//! `execute` functions that open a [`Session`] and call into the `chronicle`
//! library.

pub mod add_model;
pub mod completions;
pub mod prepare;
pub mod pull;
pub mod push;
pub mod reset;
pub mod status;
pub mod update;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use chronicle::config::{self, Settings};
use chronicle::context::Context;
use chronicle::output::OutputConfig;
use chronicle::runner::{CommandRunner, DryRunRunner, SystemRunner};

/// Options shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub output: OutputConfig,
}

/// The resolved superproject, settings and runner for one invocation
pub struct Session {
    runner: Box<dyn CommandRunner>,
    root: PathBuf,
    settings: Settings,
    output: OutputConfig,
}

impl Session {
    pub fn open(globals: &GlobalOptions) -> Result<Self> {
        let root = globals.root.canonicalize().with_context(|| {
            format!("Superproject root not found: {}", globals.root.display())
        })?;

        let settings = config::load(&root, globals.config.as_deref()).with_context(|| {
            match &globals.config {
                Some(path) => format!("Failed to load settings from {}", path.display()),
                None => format!("Failed to load settings from {}", root.display()),
            }
        })?;

        let runner: Box<dyn CommandRunner> = if globals.dry_run {
            Box::new(DryRunRunner::new(
                Box::new(SystemRunner),
                globals.output.clone(),
                &root,
            ))
        } else {
            Box::new(SystemRunner)
        };

        Ok(Self {
            runner,
            root,
            settings,
            output: globals.output.clone(),
        })
    }

    pub fn context(&self) -> Context<'_> {
        Context::new(
            self.runner.as_ref(),
            self.root.clone(),
            self.settings.clone(),
            self.output.clone(),
        )
    }
}
