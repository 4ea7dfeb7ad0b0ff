// src/export/logic.rs

use crate::core::reports;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv::export_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::pdf::export_pdf;
use crate::models::{Employee, TimeLog};
use crate::utils::time::{format_clock, format_hours};
use serde::Serialize;
use std::path::Path;

/// One line of the monthly report: a completed shift.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub start: String,
    pub end: String,
    pub hours: String,
    /// Number of administrative edits behind this line, "No" when clean.
    pub edited: String,
}

/// Per-employee, per-month hour report, the export artifact handed to
/// payroll.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub employee_name: String,
    pub month: String,
    pub total_hours: String,
    pub rows: Vec<ReportRow>,
}

impl MonthlyReport {
    /// Derive the report from the log collection. Rows are the completed
    /// logs of the month, ascending by date.
    pub fn build(logs: &[TimeLog], employee: &Employee, month: &str) -> Self {
        let monthly = reports::monthly_logs(logs, &employee.id, month);
        let rows = monthly
            .iter()
            .map(|log| ReportRow {
                date: log.date.format("%Y-%m-%d").to_string(),
                start: format_clock(Some(log.clock_in)),
                end: format_clock(log.clock_out),
                hours: format_hours(log.hours().unwrap_or(0.0)),
                edited: if log.edits.is_empty() {
                    "No".to_string()
                } else {
                    format!("Yes ({})", log.edits.len())
                },
            })
            .collect();

        Self {
            employee_name: employee.name.clone(),
            month: month.to_string(),
            total_hours: format_hours(reports::monthly_hours(logs, &employee.id, month)),
            rows,
        }
    }

    /// `Levant_Hours_<Name>_<YYYY-MM>.<ext>` with spaces flattened.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "Levant_Hours_{}_{}.{}",
            self.employee_name.replace(' ', "_"),
            self.month,
            format.extension()
        )
    }

    pub fn write(&self, format: ExportFormat, path: &Path, force: bool) -> AppResult<()> {
        ensure_writable(path, force)?;
        match format {
            ExportFormat::Pdf => export_pdf(self, path)?,
            ExportFormat::Csv => export_csv(self, path)?,
            ExportFormat::Json => export_json(self, path)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lifecycle;
    use crate::models::Role;
    use chrono::{TimeZone, Utc};

    #[test]
    fn report_totals_and_file_name() {
        let emp = Employee::new("e1", "Lisa de Vries", Role::Server);
        let mut a = lifecycle::clock_in_log("e1", Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap());
        a.id = "1".into();
        lifecycle::apply_clock_out(&mut a, Utc.with_ymd_and_hms(2024, 3, 5, 17, 0, 0).unwrap());
        let mut b = lifecycle::clock_in_log("e1", Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap());
        b.id = "2".into();
        lifecycle::apply_clock_out(&mut b, Utc.with_ymd_and_hms(2024, 3, 6, 16, 30, 0).unwrap());

        let report = MonthlyReport::build(&[a, b], &emp, "2024-03");
        assert_eq!(report.total_hours, "15.50");
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].hours, "8.00");
        assert_eq!(report.rows[0].edited, "No");
        assert_eq!(
            report.file_name(ExportFormat::Pdf),
            "Levant_Hours_Lisa_de_Vries_2024-03.pdf"
        );
    }
}
