use crate::cli::parser::{Cli, Commands, ShiftAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::table::Table;
use crate::utils::time::parse_clock;
use chrono::Days;

/// Week roster: planned shifts, nothing here couples to actual time logs.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = &cli.command else {
        return Ok(());
    };

    let mut controller = super::open_controller(cfg)?;

    match action {
        ShiftAction::Add {
            employee,
            date: date_raw,
            start,
            end,
        } => {
            super::require_pin(&controller, cli.pin.as_deref())?;
            let emp = controller.find_employee(employee)?.clone();
            let day = date::parse_date(date_raw)?;
            let start = parse_clock(start)?;
            let end = parse_clock(end)?;

            controller.add_shift(&emp.id, day, start, end)?;
            success(format!(
                "Planned {} on {day}, {}-{}",
                emp.name,
                start.format("%H:%M"),
                end.format("%H:%M")
            ));
        }
        ShiftAction::Remove { id } => {
            super::require_pin(&controller, cli.pin.as_deref())?;
            controller.remove_shift(id)?;
            success(format!("Shift {id} removed from the roster"));
        }
        ShiftAction::List { from } => {
            let first = match from {
                Some(d) => date::parse_date(d)?,
                None => date::today(),
            };

            let mut table = Table::new(&["Id", "Date", "Day", "Employee", "From", "Until"]);
            for offset in 0..7 {
                let day = first + Days::new(offset);
                for shift in controller.shifts().iter().filter(|s| s.date == day) {
                    table.add_row(vec![
                        shift.id.clone(),
                        day.to_string(),
                        day.format("%a").to_string(),
                        controller.employee_name(&shift.employee_id),
                        shift.start_time.format("%H:%M").to_string(),
                        shift.end_time.format("%H:%M").to_string(),
                    ]);
                }
            }

            if table.is_empty() {
                info(format!("No shifts planned in the week starting {first}."));
                return Ok(());
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
