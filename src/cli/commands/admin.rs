//! Destructive bulk operations and PIN management.

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Purge { yes } => {
            let mut controller = super::open_controller(cfg)?;
            super::require_pin(&controller, cli.pin.as_deref())?;

            if !yes && !super::confirm("Delete ALL completed hours? Active shifts are kept.")? {
                info("Cancelled.");
                return Ok(());
            }
            // The controller reports the outcome as a boolean so a failed
            // remote delete leaves everything in place for a retry.
            if controller.delete_completed() {
                success("All completed hours deleted; active shifts kept.");
                Ok(())
            } else {
                Err(AppError::Other(
                    "deleting completed hours failed; nothing was removed — try again".to_string(),
                ))
            }
        }
        Commands::Reset { yes } => {
            let mut controller = super::open_controller(cfg)?;
            super::require_pin(&controller, cli.pin.as_deref())?;

            if !yes
                && !super::confirm(
                    "FULL RESET: delete all hours, employees and settings. Continue?",
                )?
            {
                info("Cancelled.");
                return Ok(());
            }
            if controller.full_reset() {
                success("System reset. Run `levant setup` to start over.");
                Ok(())
            } else {
                Err(AppError::Other(
                    "reset failed partway; already-deleted data is NOT restored — retry to finish"
                        .to_string(),
                ))
            }
        }
        Commands::Pin {
            email,
            password,
            new_pin,
        } => {
            let mut controller = super::open_controller(cfg)?;
            controller.change_pin(email, password, new_pin)?;
            success("PIN changed.");
            Ok(())
        }
        _ => Ok(()),
    }
}
