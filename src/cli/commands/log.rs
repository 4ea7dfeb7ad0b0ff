use crate::cli::parser::{Cli, Commands, LogAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::LogStatus;
use crate::ui::messages::success;
use crate::utils::table::Table;
use crate::utils::date;
use crate::utils::time::{format_clock, format_hours, parse_instant, parse_optional_instant};
use chrono::Utc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Log { action } = &cli.command else {
        return Ok(());
    };

    let mut controller = super::open_controller(cfg)?;

    match action {
        LogAction::Add {
            employee,
            date: date_raw,
            start,
            end,
            reason,
        } => {
            super::require_pin(&controller, cli.pin.as_deref())?;
            let emp = controller.find_employee(employee)?.clone();
            let shift_date = date::parse_date(date_raw)?;
            let clock_in = parse_instant(shift_date, start)?;
            let clock_out = parse_optional_instant(shift_date, end.as_ref())?;

            controller.add_log(
                &emp.id,
                shift_date,
                clock_in,
                clock_out,
                reason.as_deref(),
                Utc::now(),
            )?;
            success(format!("Hours added for {} on {shift_date}", emp.name));
        }
        LogAction::Edit {
            id,
            start,
            end,
            reason,
        } => {
            super::require_pin(&controller, cli.pin.as_deref())?;
            // Bare HH:MM times are interpreted on the log's own shift date.
            let shift_date = controller
                .logs()
                .iter()
                .find(|l| l.id == *id)
                .map(|l| l.date)
                .ok_or_else(|| AppError::LogNotFound(id.clone()))?;
            let new_in = parse_instant(shift_date, start)?;
            let new_out = parse_optional_instant(shift_date, end.as_ref())?;

            controller.edit_log(id, new_in, new_out, reason, Utc::now())?;
            success(format!("Log {id} updated"));
        }
        LogAction::List { month, employee } => {
            let month = match month {
                Some(m) => Some(date::parse_month(m)?),
                None => None,
            };
            let employee_id = match employee {
                Some(q) => Some(controller.find_employee(q)?.id.clone()),
                None => None,
            };

            let mut table = Table::new(&["Id", "Employee", "Date", "In", "Out", "Hours", "Edits"]);
            for log in controller.logs() {
                if let Some(m) = &month
                    && log.date.format("%Y-%m").to_string() != *m
                {
                    continue;
                }
                if let Some(eid) = &employee_id
                    && log.employee_id != *eid
                {
                    continue;
                }
                let hours = match log.status {
                    LogStatus::Completed => format_hours(log.hours().unwrap_or(0.0)),
                    LogStatus::Active => "...".to_string(),
                };
                table.add_row(vec![
                    log.id.clone(),
                    controller.employee_name(&log.employee_id),
                    log.date.to_string(),
                    format_clock(Some(log.clock_in)),
                    format_clock(log.clock_out),
                    hours,
                    log.edits.len().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
