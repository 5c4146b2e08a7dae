//! `completions <shell>`: prints a `clap_complete` completion script.
//!
//! ```bash
//! chronicle completions bash > ~/.local/share/bash-completion/completions/chronicle
//! chronicle completions zsh > ~/.zfunc/_chronicle
//! chronicle completions fish > ~/.config/fish/completions/chronicle.fish
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, bin, &mut io::stdout());
    Ok(())
}
