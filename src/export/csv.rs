use crate::errors::{AppError, AppResult};
use crate::export::MonthlyReport;
use crate::export::notify_export_success;
use std::path::Path;

pub fn export_csv(report: &MonthlyReport, path: &Path) -> AppResult<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("cannot open {}: {e}", path.display())))?;

    writer
        .write_record(["date", "start", "end", "hours", "edited"])
        .map_err(|e| AppError::Export(e.to_string()))?;
    for row in &report.rows {
        writer
            .write_record([&row.date, &row.start, &row.end, &row.hours, &row.edited])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }
    writer
        .write_record(["total", "", "", &report.total_hours, ""])
        .map_err(|e| AppError::Export(e.to_string()))?;
    writer.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
