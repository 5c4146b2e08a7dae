//! # Error Handling
//!
//! This module defines the centralized error type for the `chronicle`
//! library. It uses `thiserror` to build an `Error` enum covering every
//! failure mode of the automation workflows, with enough context in each
//! variant for the operator to fix the reported condition and re-run.
//!
//! The variants fall into three groups:
//!
//! - **Precondition failures**: a required parameter is missing or invalid,
//!   a submodule has uncommitted changes, or a repository directory has not
//!   been materialized yet. These abort before anything is mutated.
//! - **External command failures**: a `git`, `git-lfs` or update script
//!   invocation exited non-zero or could not be started. These carry the
//!   command line, working directory and captured stderr.
//! - **Settings and I/O failures**: the optional settings file could not be
//!   read or parsed.
//!
//! "Nothing to commit" is deliberately not an error; see
//! [`crate::pipeline::CommitOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chronicle operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter was not supplied or was empty.
    #[error("Missing required parameter {name}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    MissingParameter {
        /// The parameter name as the operator knows it (e.g. `REPO_URL`)
        name: String,
        hint: Option<String>,
    },

    /// A parameter was supplied but its value cannot be used.
    #[error("Invalid value for {name}: {message}")]
    InvalidParameter { name: String, message: String },

    /// One or more submodules have uncommitted changes.
    #[error(
        "Submodules with uncommitted changes: {}\n  hint: commit or discard the changes, or run `reset-submodules` to start over",
        paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    UncleanSubmodules { paths: Vec<PathBuf> },

    /// A repository directory that a workflow expects to exist is missing.
    #[error("Repository directory not found: {}{}", path.display(), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    RepositoryMissing { path: PathBuf, hint: Option<String> },

    /// An external command ran but exited unsuccessfully.
    #[error("Command `{command}` failed in {} ({status}){}", cwd.display(), if stderr.trim().is_empty() { String::new() } else { format!(": {}", stderr.trim()) })]
    CommandFailed {
        command: String,
        cwd: PathBuf,
        /// Human-readable exit status (`exit code 1`, `terminated by signal`)
        status: String,
        stderr: String,
    },

    /// An external command could not be started at all.
    #[error("Failed to run `{command}`: {message}")]
    CommandSpawn { command: String, message: String },

    /// The settings file is structurally invalid.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pattern failed to compile, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
