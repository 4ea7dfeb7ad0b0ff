use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::SqliteStore;
use crate::ui::messages::success;

/// Create the config file and the database with its schema.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;
    SqliteStore::open(&cfg.database)?;

    success("Levant initialized. Run `levant setup` to register the admin.");
    Ok(())
}
