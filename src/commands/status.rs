//! # Status Command
//!
//! Read-only overview of every submodule: path, remote URL, working-tree
//! state and local branches, with protected branches marked. Useful before
//! `pull-submodules` (which refuses dirty submodules) or `reset-submodules`
//! (which deletes every branch listed here).

use anyhow::Result;
use clap::{Args, ValueEnum};

use chronicle::output::{emoji, OutputConfig};
use chronicle::submodule::{Submodule, WorkTree};
use chronicle::sync::Orchestrator;

use super::{GlobalOptions, Session};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusFormat {
    #[default]
    Text,
    Json,
}

/// Show every submodule's state and branches
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = StatusFormat::Text)]
    pub format: StatusFormat,
}

pub fn execute(args: StatusArgs, globals: &GlobalOptions) -> Result<()> {
    let session = Session::open(globals)?;
    let ctx = session.context();
    let submodules = Orchestrator::new(&ctx).submodules()?;

    match args.format {
        StatusFormat::Json => println!("{}", serde_json::to_string_pretty(&submodules)?),
        StatusFormat::Text => {
            if submodules.is_empty() {
                println!("No submodules configured.");
            }
            for line in render(&submodules, &globals.output) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn render(submodules: &[Submodule], out: &OutputConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for s in submodules {
        let state = match s.state {
            WorkTree::Clean => emoji(out, "✅ clean", "clean"),
            WorkTree::Dirty => emoji(out, "⚠️  dirty", "dirty"),
            WorkTree::Uninitialized => emoji(out, "⏸  uninitialized", "uninitialized"),
        };
        lines.push(format!(
            "{} [{}] {}",
            s.path.display(),
            state,
            s.url.as_deref().unwrap_or("(no url)")
        ));
        if !s.branches.is_empty() {
            let branches: Vec<String> = s
                .branches
                .iter()
                .map(|b| {
                    if b.protected {
                        format!("{} (protected)", b.name)
                    } else {
                        b.name.clone()
                    }
                })
                .collect();
            lines.push(format!("    branches: {}", branches.join(", ")));
        }
    }
    lines
}
