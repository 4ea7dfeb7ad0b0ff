use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::MonthlyReport;
use crate::ui::messages::warning;
use crate::utils::date;
use std::path::PathBuf;

/// Build and write the per-employee monthly hour report. Works for
/// deactivated employees too: their history stays reportable.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        employee,
        month,
        format,
        out,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let controller = super::open_controller(cfg)?;

    let emp = controller
        .employees()
        .iter()
        .find(|e| e.id == *employee || e.name.eq_ignore_ascii_case(employee))
        .cloned()
        .ok_or_else(|| AppError::EmployeeNotFound(employee.clone()))?;

    let month = match month {
        Some(m) => date::parse_month(m)?,
        None => date::this_month(),
    };

    let report = MonthlyReport::build(controller.logs(), &emp, &month);
    if report.rows.is_empty() {
        warning(format!("No completed hours for {} in {month}.", emp.name));
    }

    let path = match out {
        Some(file) => PathBuf::from(file),
        None => PathBuf::from(report.file_name(*format)),
    };
    report.write(*format, &path, *force)?;
    Ok(())
}
