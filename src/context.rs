//! Everything a workflow needs, passed explicitly.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::output::OutputConfig;
use crate::runner::CommandRunner;

/// The superproject being automated and how to act on it
pub struct Context<'a> {
    pub runner: &'a dyn CommandRunner,
    /// Superproject root; every working directory is derived from it.
    pub root: PathBuf,
    pub settings: Settings,
    pub output: OutputConfig,
}

impl<'a> Context<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        root: impl Into<PathBuf>,
        settings: Settings,
        output: OutputConfig,
    ) -> Self {
        Self {
            runner,
            root: root.into(),
            settings,
            output,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
