use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::reports;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::time::format_clock;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// Print every administrative edit, most recent first: who was edited,
/// when, the previous and new clock times, and the mandatory reason.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let controller = super::open_controller(cfg)?;
    super::require_pin(&controller, cli.pin.as_deref())?;

    let trail = reports::audit_trail(controller.logs());
    if trail.is_empty() {
        info("No administrative edits recorded.");
        return Ok(());
    }

    println!("📜 Audit trail ({} edits):\n", trail.len());

    let names: Vec<String> = trail
        .iter()
        .map(|e| controller.employee_name(&e.employee_id))
        .collect();
    let name_w = names
        .iter()
        .map(|n| n.len())
        .max()
        .unwrap_or(8)
        .min(30);

    for (entry, name) in trail.iter().zip(&names) {
        let when = entry.record.date.format("%Y-%m-%d %H:%M");
        let colored_name = Colour::Yellow.paint(name.as_str()).to_string();
        let padding = " ".repeat(name_w.saturating_sub(strip_ansi(&colored_name).len()));

        let change = format!(
            "{} – {}  ->  {} – {}",
            format_clock(entry.record.previous_in),
            format_clock(entry.record.previous_out),
            format_clock(entry.record.new_in),
            format_clock(entry.record.new_out),
        );

        println!(
            "{} | {}{} | shift {} | {} | {} ({})",
            when,
            colored_name,
            padding,
            entry.log_date,
            change,
            entry.record.reason,
            entry.record.admin_name,
        );
    }

    Ok(())
}
