//! # Chronicle Library
//!
//! Automation for a superproject that tracks firmware SDK history
//! repositories, one per device model, as git submodules under
//! `models/<MODEL>/repo`. The `chronicle` binary exposes each workflow as a
//! subcommand; this library owns the workflows themselves.
//!
//! ## Quick Example
//!
//! ```no_run
//! use chronicle::config::Settings;
//! use chronicle::context::Context;
//! use chronicle::output::OutputConfig;
//! use chronicle::runner::SystemRunner;
//! use chronicle::sync::Orchestrator;
//!
//! let runner = SystemRunner;
//! let ctx = Context::new(&runner, ".", Settings::default(), OutputConfig::default());
//! Orchestrator::new(&ctx).pull_submodules()?;
//! # Ok::<(), chronicle::error::Error>(())
//! ```
//!
//! ## Components
//!
//! - **Command execution (`runner`, `git`)**: every external command goes
//!   through the `CommandRunner` trait, so workflows can be exercised
//!   against a scripted runner and dry runs can print instead of act.
//! - **Enumeration (`submodule`)**: reads `.gitmodules` and inspects each
//!   submodule's checkout state, cleanliness and local branches.
//! - **Synchronization (`plan`, `sync`)**: the pull, reset and push
//!   workflows, each planned from a fresh enumeration and executed
//!   fail-fast.
//! - **Pipeline (`pipeline`)**: the update script plus stage/commit as
//!   `prepare`, and `prepare` plus pushes as `all`.
//! - **Models (`models`)**: registering a new model repository.
//! - **Settings (`config`, `defaults`)**: the optional `.chronicle.yaml`.
//!
//! Everything runs sequentially in one thread; each command finishes before
//! the next starts.

pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod git;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod runner;
pub mod submodule;
pub mod sync;

#[cfg(test)]
mod submodule_proptest;
