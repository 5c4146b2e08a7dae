//! # Update Pipeline
//!
//! Composes the metadata/SDK update script and the superproject's stage and
//! commit steps into `prepare`, and `prepare` plus the pushes into `all`.
//! Each stage only runs if the one before it succeeded.
//!
//! An empty commit is the one tolerated non-event: when the update produced
//! no changes, `commit` reports "nothing to commit" and the pipeline
//! carries on, which makes `prepare` safe to re-run.

use log::{info, warn};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::git;
use crate::output;
use crate::runner::Invocation;
use crate::sync::Orchestrator;

/// What `commit` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    NothingToCommit,
}

/// Runs the update pipeline against one superproject
pub struct Pipeline<'c, 'r> {
    ctx: &'c Context<'r>,
}

impl<'c, 'r> Pipeline<'c, 'r> {
    pub fn new(ctx: &'c Context<'r>) -> Self {
        Self { ctx }
    }

    /// The update script invocation, with `model` as its only argument if
    /// given.
    pub fn update_invocation(&self, model: Option<&str>) -> Result<Invocation> {
        let command = &self.ctx.settings.update_command;
        let (program, args) = command.split_first().ok_or_else(|| Error::ConfigParse {
            message: "update_command must name a program".to_string(),
            hint: None,
        })?;
        let mut invocation = Invocation::new(program.as_str(), self.ctx.root()).args(args.iter().cloned());
        if let Some(model) = model {
            if model.trim().is_empty() {
                return Err(Error::InvalidParameter {
                    name: "MODEL".to_string(),
                    message: "must not be empty when given".to_string(),
                });
            }
            invocation = invocation.arg(model.trim());
        }
        Ok(invocation)
    }

    /// Runs the external metadata/SDK fetch script.
    pub fn update(&self, model: Option<&str>) -> Result<()> {
        let invocation = self.update_invocation(model)?;
        output::step(&self.ctx.output, &format!("Updating metadata and SDKs ({})", invocation));
        info!("running update script: {}", invocation);
        self.ctx.runner.run_checked(&invocation)?;
        Ok(())
    }

    /// Stages every change in the superproject.
    pub fn stage(&self) -> Result<()> {
        output::step(&self.ctx.output, "Staging changes");
        self.ctx.runner.run_checked(&git::add_all(self.ctx.root()))?;
        Ok(())
    }

    /// Commits the staged changes with the configured message.
    pub fn commit(&self) -> Result<CommitOutcome> {
        let root = self.ctx.root();
        if !git::has_staged_changes(self.ctx.runner, root)? {
            warn!("nothing staged in {}", root.display());
            output::note(&self.ctx.output, "nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }
        output::step(&self.ctx.output, "Committing");
        self.ctx
            .runner
            .run_checked(&git::commit(root, &self.ctx.settings.commit_message))?;
        output::done(&self.ctx.output, "Committed");
        Ok(CommitOutcome::Committed)
    }

    /// `update`, `stage`, `commit`.
    pub fn prepare(&self, model: Option<&str>) -> Result<CommitOutcome> {
        self.update(model)?;
        self.stage()?;
        self.commit()
    }

    /// `prepare`, `push-submodules`, `push-repo`.
    pub fn all(&self, model: Option<&str>) -> Result<()> {
        self.prepare(model)?;
        let orchestrator = Orchestrator::new(self.ctx);
        orchestrator.push_submodules()?;
        orchestrator.push_repo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::output::OutputConfig;
    use crate::runner::testing::ScriptedRunner;
    use std::path::Path;

    const ROOT: &str = "/superproject";

    fn context(runner: &ScriptedRunner) -> Context<'_> {
        Context::new(runner, ROOT, Settings::default(), OutputConfig::without_color())
    }

    #[test]
    fn test_update_runs_script_in_root() {
        let runner = ScriptedRunner::new();
        let ctx = context(&runner);
        Pipeline::new(&ctx).update(None).unwrap();
        assert_eq!(
            runner.command_lines_in(ROOT),
            vec!["python3 teltochronicle.py"]
        );
    }

    #[test]
    fn test_update_passes_model_through() {
        let runner = ScriptedRunner::new();
        let ctx = context(&runner);
        Pipeline::new(&ctx).update(Some(" RUT950 ")).unwrap();
        assert_eq!(
            runner.command_lines_in(ROOT),
            vec!["python3 teltochronicle.py RUT950"]
        );
    }

    #[test]
    fn test_update_rejects_blank_model() {
        let runner = ScriptedRunner::new();
        let ctx = context(&runner);
        let err = Pipeline::new(&ctx).update(Some("  ")).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_commit_with_staged_changes() {
        let runner = ScriptedRunner::new().fail(ROOT, "git diff --cached --quiet", 1, "");
        let ctx = context(&runner);
        assert_eq!(Pipeline::new(&ctx).commit().unwrap(), CommitOutcome::Committed);
        assert_eq!(
            runner.mutations(),
            vec!["git commit -m 'Update firmware metadata and SDKs'"]
        );
    }

    #[test]
    fn test_commit_nothing_to_commit_is_not_a_failure() {
        let runner = ScriptedRunner::new();
        let ctx = context(&runner);
        assert_eq!(
            Pipeline::new(&ctx).commit().unwrap(),
            CommitOutcome::NothingToCommit
        );
        assert!(runner.mutations().is_empty());
    }

    #[test]
    fn test_prepare_twice_is_idempotent() {
        let runner = ScriptedRunner::new();
        let ctx = context(&runner);
        let pipeline = Pipeline::new(&ctx);
        assert_eq!(pipeline.prepare(None).unwrap(), CommitOutcome::NothingToCommit);
        assert_eq!(pipeline.prepare(None).unwrap(), CommitOutcome::NothingToCommit);
        assert!(runner.mutations().iter().all(|c| !c.starts_with("git commit")));
    }

    #[test]
    fn test_prepare_stops_when_update_fails() {
        let runner = ScriptedRunner::new().fail(ROOT, "python3 teltochronicle.py", 1, "HTTP 500");
        let ctx = context(&runner);
        assert!(Pipeline::new(&ctx).prepare(None).is_err());
        assert_eq!(runner.mutations(), vec!["python3 teltochronicle.py"]);
    }

    #[test]
    fn test_all_does_not_push_when_commit_fails() {
        let runner = ScriptedRunner::new()
            .fail(ROOT, "git diff --cached --quiet", 1, "")
            .fail(
                ROOT,
                "git commit -m 'Update firmware metadata and SDKs'",
                1,
                "Author identity unknown",
            );
        let ctx = context(&runner);
        let err = Pipeline::new(&ctx).all(None).unwrap_err();
        assert!(format!("{}", err).contains("Author identity unknown"));
        assert!(runner.mutations().iter().all(|c| !c.starts_with("git push")));
    }

    #[test]
    fn test_all_continues_past_nothing_to_commit() {
        let runner = ScriptedRunner::new();
        let ctx = context(&runner);
        Pipeline::new(&ctx).all(None).unwrap();
        assert_eq!(
            runner.mutations(),
            vec!["python3 teltochronicle.py", "git add -A", "git push"]
        );
        assert!(runner.calls().iter().all(|c| c.cwd == Path::new(ROOT)));
    }

    #[test]
    fn test_custom_update_command_and_message() {
        let runner = ScriptedRunner::new().fail(ROOT, "git diff --cached --quiet", 1, "");
        let settings = Settings {
            update_command: vec!["./fetch.sh".to_string(), "--quiet".to_string()],
            commit_message: "SDK import".to_string(),
            ..Settings::default()
        };
        let ctx = Context::new(&runner, ROOT, settings, OutputConfig::without_color());
        Pipeline::new(&ctx).prepare(None).unwrap();
        assert_eq!(
            runner.mutations(),
            vec!["./fetch.sh --quiet", "git add -A", "git commit -m 'SDK import'"]
        );
    }
}
