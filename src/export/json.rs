use crate::errors::AppResult;
use crate::export::MonthlyReport;
use crate::export::notify_export_success;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn export_json(report: &MonthlyReport, path: &Path) -> AppResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    notify_export_success("JSON", path);
    Ok(())
}
