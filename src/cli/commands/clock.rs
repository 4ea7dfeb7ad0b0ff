use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::Utc;

/// Clock an employee in or out. Store failures stay off this screen:
/// the controller logs them and self-corrects on the next load.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut controller = super::open_controller(cfg)?;

    match &cli.command {
        Commands::In { employee } => {
            let emp = controller.find_employee(employee)?.clone();
            let now = Utc::now();
            controller.clock_in(&emp.id, now)?;
            success(format!(
                "{} clocked in at {}",
                emp.name,
                now.format("%H:%M")
            ));
        }
        Commands::Out { employee } => {
            let emp = controller.find_employee(employee)?.clone();
            let has_active = controller
                .logs()
                .iter()
                .any(|l| l.employee_id == emp.id && l.is_active());
            if !has_active {
                info(format!("{} is not clocked in — nothing to do", emp.name));
                return Ok(());
            }
            let now = Utc::now();
            controller.clock_out(&emp.id, now)?;
            success(format!(
                "{} clocked out at {}",
                emp.name,
                now.format("%H:%M")
            ));
        }
        _ => {}
    }
    Ok(())
}
