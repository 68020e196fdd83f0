//! rPlanner library root.
//! Shared-table synchronization (store, reconciler, writer) plus the CLI
//! parser and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Calendar { .. } => cli::commands::calendar::handle(&cli.command, cfg),
        Commands::Tasks { action } => cli::commands::tasks::handle(action, cfg),
        Commands::Activities { action } => cli::commands::activities::handle(action, cfg),
        Commands::Progress { .. } => cli::commands::progress::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr; RUST_LOG wins over --verbose.
fn init_logging(verbose: bool) {
    let default = if verbose { "rplanner=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ per-invocation endpoint override
    if let Some(endpoint) = &cli.endpoint {
        cfg.endpoint = endpoint.clone();
    }

    dispatch(&cli, &cfg)
}
