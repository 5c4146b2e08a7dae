//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, GlobalOptions};
use chronicle::output::OutputConfig;

/// Chronicle - keep a firmware SDK history superproject and its model submodules in sync
#[derive(Parser, Debug)]
#[command(name = "chronicle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Root of the superproject
    #[arg(long, global = true, value_name = "DIR", env = "CHRONICLE_ROOT", default_value = ".")]
    root: PathBuf,

    /// Settings file (defaults to <root>/.chronicle.yaml when present)
    #[arg(long, global = true, value_name = "FILE", env = "CHRONICLE_CONFIG")]
    config: Option<PathBuf>,

    /// Print mutating commands instead of running them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace); RUST_LOG applies when unset
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the metadata/SDK update script
    Update(commands::update::UpdateArgs),

    /// Stage all changes in the superproject
    Stage,

    /// Commit staged changes with the configured message
    Commit,

    /// Force-push all branches and push all tags of every submodule
    PushSubmodules,

    /// Push the superproject's current branch
    PushRepo,

    /// Fast-forward the superproject from its upstream
    PullRepo,

    /// Fetch Git LFS objects for the superproject
    PullLfs,

    /// Update submodules and fast-forward their ordinary branches
    PullSubmodules,

    /// Discard all local submodule state and start over from the remotes
    ResetSubmodules,

    /// Run pull-repo, pull-lfs and pull-submodules
    Pull,

    /// Run update, stage and commit
    Prepare(commands::prepare::PrepareArgs),

    /// Run prepare, push-submodules and push-repo
    All(commands::prepare::PrepareArgs),

    /// Register a model's SDK history repository as a submodule
    AddModel(commands::add_model::AddModelArgs),

    /// Show every submodule's state and branches
    Status(commands::status::StatusArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level.as_deref());

        let globals = GlobalOptions {
            root: self.root,
            config: self.config,
            dry_run: self.dry_run,
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::Update(args) => commands::update::execute(args, &globals),
            Commands::Stage => commands::update::execute_stage(&globals),
            Commands::Commit => commands::update::execute_commit(&globals),
            Commands::PushSubmodules => commands::push::execute_submodules(&globals),
            Commands::PushRepo => commands::push::execute_repo(&globals),
            Commands::PullRepo => commands::pull::execute_repo(&globals),
            Commands::PullLfs => commands::pull::execute_lfs(&globals),
            Commands::PullSubmodules => commands::pull::execute_submodules(&globals),
            Commands::ResetSubmodules => commands::reset::execute(&globals),
            Commands::Pull => commands::pull::execute(&globals),
            Commands::Prepare(args) => commands::prepare::execute_prepare(args, &globals),
            Commands::All(args) => commands::prepare::execute_all(args, &globals),
            Commands::AddModel(args) => commands::add_model::execute(args, &globals),
            Commands::Status(args) => commands::status::execute(args, &globals),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(level);
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };
    builder.format_timestamp(None);
    if let Err(e) = builder.try_init() {
        log::debug!("logger already initialized: {}", e);
    }
}
