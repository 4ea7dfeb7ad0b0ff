use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::controller::{Controller, LoadOutcome};
use crate::errors::{AppError, AppResult};
use crate::store::SqliteStore;
use crate::ui::messages::success;
use crate::utils::date;

/// First-run setup: register the admin identity, store the PIN. Refused
/// once a settings row exists.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Setup {
        email,
        password,
        pin_code,
    } = cmd
    {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Config(
                "email and password are both required".to_string(),
            ));
        }

        let store = SqliteStore::open(&cfg.database)?;
        let mut controller = Controller::new(store);
        if controller.load(date::today())? == LoadOutcome::Ready {
            return Err(AppError::Config(
                "system is already set up (use `levant pin` to change the PIN)".to_string(),
            ));
        }

        controller.setup(email, password, pin_code)?;
        success("Setup complete. The terminal is ready for clock-ins.");
    }
    Ok(())
}
