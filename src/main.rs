//! # Chronicle CLI
//!
//! Binary entry point for the `chronicle` command-line tool.
//!
//! It parses arguments with `clap`, sets up logging and output styling, and
//! dispatches to the subcommand. The workflows live in the `chronicle`
//! library crate; the binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
