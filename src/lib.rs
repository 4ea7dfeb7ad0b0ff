//! Levant library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Setup { .. } => cli::commands::setup::handle(&cli.command, cfg),
        Commands::In { .. } | Commands::Out { .. } => cli::commands::clock::handle(cli, cfg),
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::Staff { .. } => cli::commands::staff::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cli, cfg),
        Commands::Shift { .. } => cli::commands::schedule::handle(cli, cfg),
        Commands::Audit => cli::commands::audit::handle(cli, cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Purge { .. } | Commands::Reset { .. } | Commands::Pin { .. } => {
            cli::commands::admin::handle(cli, cfg)
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // Command-line DB override wins over the config file.
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
