use crate::config::Config;
use crate::core::reports;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::date;
use crate::utils::table::Table;
use crate::utils::time::format_clock;

/// The clock-in board: one line per active employee with their current
/// classification (not started / working / finished today).
pub fn handle(cfg: &Config) -> AppResult<()> {
    let controller = super::open_controller(cfg)?;
    let today = date::today();

    let logs = controller.logs();
    let active = reports::active_employee_ids(logs);
    let finished = reports::finished_today_ids(logs, today);

    header(format!("{} — {}", cfg.venue_name, today.format("%A %e %B %Y")));

    let mut table = Table::new(&["Name", "Role", "Status"]);
    for emp in controller.employees().iter().filter(|e| e.is_active) {
        let status = if active.contains(&emp.id) {
            let since = logs
                .iter()
                .find(|l| l.employee_id == emp.id && l.is_active())
                .map(|l| format_clock(Some(l.clock_in)))
                .unwrap_or_else(|| "-".to_string());
            format!("Working since {since}")
        } else if finished.contains(&emp.id) {
            "Finished today".to_string()
        } else {
            "Not started".to_string()
        };
        table.add_row(vec![emp.name.clone(), emp.role.to_string(), status]);
    }

    if table.is_empty() {
        warning("No active employees. Add staff with `levant staff add`.");
        return Ok(());
    }
    print!("{}", table.render());
    Ok(())
}
