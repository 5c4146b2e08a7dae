//! # External Command Execution
//!
//! Every workflow in this crate is a sequence of external commands (`git`,
//! `git lfs`, the metadata update script). This module is the single seam
//! through which they are executed.
//!
//! ## Design
//!
//! - **`Invocation`**: a fully described command: program, arguments, the
//!   working directory it runs in, and whether it is a read-only query or a
//!   mutation. Working directories are always explicit; the process-wide
//!   current directory is never changed.
//! - **`CommandRunner`**: the trait workflows are written against. It allows
//!   the real process execution to be swapped out, which is how the
//!   workflows are tested without touching real repositories.
//! - **`SystemRunner`**: runs commands with `std::process::Command`. Query
//!   output is captured; mutations inherit the terminal so the operator sees
//!   git's own progress output.
//! - **`DryRunRunner`**: runs queries for real (so plans are computed from
//!   the actual repository state) but only prints mutations.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};
use crate::output::{emoji, OutputConfig};

/// Whether a command only inspects state or changes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Read-only; safe to run during a dry run. Output is captured.
    Query,
    /// Changes the repository, the working tree or a remote.
    Mutation,
}

/// A single external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub effect: Effect,
}

impl Invocation {
    /// Creates a mutating invocation of `program` in `cwd`.
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            effect: Effect::Mutation,
        }
    }

    /// Shorthand for `Invocation::new("git", cwd)`.
    pub fn git(cwd: impl Into<PathBuf>) -> Self {
        Self::new("git", cwd)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Marks this invocation as read-only.
    pub fn query(mut self) -> Self {
        self.effect = Effect::Query;
        self
    }

    pub fn is_query(&self) -> bool {
        self.effect == Effect::Query
    }

    /// The command as a shell-like string, for logs and error messages.
    ///
    /// Arguments containing whitespace are single-quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                if part.is_empty() || part.chars().any(char::is_whitespace) {
                    format!("'{}'", part)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// The result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful, silent result.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    /// A successful result with the given stdout.
    pub fn with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status_description(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes external commands.
///
/// `run` only fails when the command could not be started; a non-zero exit
/// is reported through [`CommandOutput::code`]. Use [`run_checked`] when any
/// non-zero exit should abort the workflow.
///
/// [`run_checked`]: CommandRunner::run_checked
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Runs `invocation` and turns a non-zero exit into [`Error::CommandFailed`].
    fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let output = self.run(invocation)?;
        if output.success() {
            Ok(output)
        } else {
            Err(Error::CommandFailed {
                command: invocation.command_line(),
                cwd: invocation.cwd.clone(),
                status: output.status_description(),
                stderr: output.stderr,
            })
        }
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(
            "running `{}` in {}",
            invocation.command_line(),
            invocation.cwd.display()
        );

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).current_dir(&invocation.cwd);

        let spawn_error = |e: std::io::Error| Error::CommandSpawn {
            command: invocation.command_line(),
            message: format!("{} (in {})", e, invocation.cwd.display()),
        };

        let output = match invocation.effect {
            Effect::Query => {
                let output = command.stdin(Stdio::null()).output().map_err(spawn_error)?;
                CommandOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
            Effect::Mutation => {
                let status = command.status().map_err(spawn_error)?;
                CommandOutput {
                    code: status.code(),
                    ..CommandOutput::default()
                }
            }
        };

        debug!(
            "`{}` finished with {}",
            invocation.command_line(),
            output.status_description()
        );
        Ok(output)
    }
}

/// Prints mutations instead of running them.
pub struct DryRunRunner {
    inner: Box<dyn CommandRunner>,
    output: OutputConfig,
    root: PathBuf,
}

impl DryRunRunner {
    /// Wraps `inner`, which still executes queries. Working directories are
    /// printed relative to `root` where possible.
    pub fn new(inner: Box<dyn CommandRunner>, output: OutputConfig, root: &Path) -> Self {
        Self {
            inner,
            output,
            root: root.to_path_buf(),
        }
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        if invocation.is_query() {
            return self.inner.run(invocation);
        }

        let location = match invocation.cwd.strip_prefix(&self.root) {
            Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Ok(relative) => relative.display().to_string(),
            Err(_) => invocation.cwd.display().to_string(),
        };
        println!(
            "{} ({}) {}",
            emoji(&self.output, "🔎", "[DRY-RUN]"),
            location,
            invocation.command_line()
        );
        Ok(CommandOutput::ok())
    }
}
