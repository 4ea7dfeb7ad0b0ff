pub mod admin;
pub mod audit;
pub mod clock;
pub mod init;
pub mod log;
pub mod report;
pub mod schedule;
pub mod setup;
pub mod staff;
pub mod status;

use crate::config::Config;
use crate::core::controller::{Controller, LoadOutcome};
use crate::errors::{AppError, AppResult};
use crate::store::SqliteStore;
use crate::utils::date;
use std::io::{Write, stdin, stdout};

/// Open the store and load authoritative state. Every command except
/// `init` and `setup` goes through here.
pub fn open_controller(cfg: &Config) -> AppResult<Controller<SqliteStore>> {
    let store = SqliteStore::open(&cfg.database)?;
    let mut controller = Controller::new(store);
    match controller.load(date::today())? {
        LoadOutcome::Ready => Ok(controller),
        LoadOutcome::NeedsSetup => Err(AppError::NeedsSetup),
    }
}

/// Admin gate: exact match of `--pin` against the settings row.
pub fn require_pin(controller: &Controller<SqliteStore>, pin: Option<&str>) -> AppResult<()> {
    controller.verify_pin(pin.unwrap_or_default())
}

/// y/N confirmation on stdin.
pub fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{prompt} [y/N]: ");
    stdout().flush()?;
    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
