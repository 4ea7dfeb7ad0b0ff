//! Derived views over the log collection.
//!
//! Stateless filter/map/sort functions: who is clocked in right now, who
//! already finished today, monthly hour totals, and the flattened audit
//! trail. None of them depend on input order except where a sort is the
//! documented output contract.

use crate::models::{EditRecord, LogStatus, TimeLog};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Employees with an active log right now.
pub fn active_employee_ids(logs: &[TimeLog]) -> HashSet<String> {
    logs.iter()
        .filter(|l| l.status == LogStatus::Active)
        .map(|l| l.employee_id.clone())
        .collect()
}

/// Employees who completed a shift today and are not clocked in anymore.
/// Display classification only: not-started / working / finished-today.
pub fn finished_today_ids(logs: &[TimeLog], today: NaiveDate) -> HashSet<String> {
    let active = active_employee_ids(logs);
    logs.iter()
        .filter(|l| l.date == today && l.status == LogStatus::Completed)
        .map(|l| l.employee_id.clone())
        .filter(|id| !active.contains(id))
        .collect()
}

/// Completed logs for one employee in one `YYYY-MM` month, ascending by
/// date (the order the exported report lists them in).
pub fn monthly_logs<'a>(logs: &'a [TimeLog], employee_id: &str, month: &str) -> Vec<&'a TimeLog> {
    let mut out: Vec<&TimeLog> = logs
        .iter()
        .filter(|l| {
            l.employee_id == employee_id
                && l.status == LogStatus::Completed
                && l.date.format("%Y-%m").to_string() == month
        })
        .collect();
    out.sort_by_key(|l| l.date);
    out
}

/// Total worked hours for one employee in one month. Floating point, not
/// rounded here; only the rendered output rounds to two decimals.
pub fn monthly_hours(logs: &[TimeLog], employee_id: &str, month: &str) -> f64 {
    monthly_logs(logs, employee_id, month)
        .iter()
        .filter_map(|l| l.hours())
        .sum()
}

/// One flattened audit-trail entry: an edit record annotated with the log
/// it belongs to.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub record: EditRecord,
    pub log_id: String,
    pub log_date: NaiveDate,
    pub employee_id: String,
}

/// Every edit of every log, most recent administrative action first.
pub fn audit_trail(logs: &[TimeLog]) -> Vec<AuditEntry> {
    let mut trail: Vec<AuditEntry> = logs
        .iter()
        .flat_map(|log| {
            log.edits.iter().map(|record| AuditEntry {
                record: record.clone(),
                log_id: log.id.clone(),
                log_date: log.date,
                employee_id: log.employee_id.clone(),
            })
        })
        .collect();
    trail.sort_by(|a, b| b.record.date.cmp(&a.record.date));
    trail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lifecycle;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    fn completed(id: &str, emp: &str, day: u32, from: u32, to: u32) -> TimeLog {
        let mut log = lifecycle::clock_in_log(emp, ts(day, from));
        log.id = id.to_string();
        lifecycle::apply_clock_out(&mut log, ts(day, to));
        log
    }

    #[test]
    fn monthly_hours_sums_completed_logs_in_month() {
        let mut half = completed("2", "e1", 6, 9, 16);
        half.clock_out = Some(Utc.with_ymd_and_hms(2024, 3, 6, 16, 30, 0).unwrap());

        let logs = vec![
            completed("1", "e1", 5, 9, 17),               // 8.00
            half,                                         // 7.50
            completed("3", "e2", 5, 9, 17),               // other employee
            lifecycle::clock_in_log("e1", ts(7, 9)),      // active, excluded
        ];

        assert_eq!(monthly_hours(&logs, "e1", "2024-03"), 15.5);
        assert_eq!(monthly_hours(&logs, "e1", "2024-02"), 0.0);
    }

    #[test]
    fn monthly_hours_is_order_independent() {
        let mut logs = vec![
            completed("1", "e1", 5, 9, 17),
            completed("2", "e1", 12, 10, 18),
            completed("3", "e1", 1, 8, 12),
        ];
        let forward = monthly_hours(&logs, "e1", "2024-03");
        logs.reverse();
        assert_eq!(monthly_hours(&logs, "e1", "2024-03"), forward);
    }

    #[test]
    fn monthly_logs_sorted_ascending_by_date() {
        let logs = vec![
            completed("1", "e1", 20, 9, 17),
            completed("2", "e1", 3, 9, 17),
            completed("3", "e1", 11, 9, 17),
        ];
        let days: Vec<u32> = monthly_logs(&logs, "e1", "2024-03")
            .iter()
            .map(|l| l.date.format("%d").to_string().parse().unwrap())
            .collect();
        assert_eq!(days, vec![3, 11, 20]);
    }

    #[test]
    fn finished_today_excludes_currently_active() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let logs = vec![
            completed("1", "e1", 5, 9, 12),
            // e1 clocked back in after the completed shift
            {
                let mut l = lifecycle::clock_in_log("e1", ts(5, 14));
                l.id = "2".to_string();
                l
            },
            completed("3", "e2", 5, 9, 17),
            completed("4", "e3", 4, 9, 17), // yesterday
        ];

        let active = active_employee_ids(&logs);
        let finished = finished_today_ids(&logs, today);
        assert!(active.contains("e1"));
        assert!(!finished.contains("e1"));
        assert!(finished.contains("e2"));
        assert!(!finished.contains("e3"));
    }

    #[test]
    fn audit_trail_is_flattened_most_recent_first() {
        let mut a = completed("1", "e1", 5, 9, 17);
        lifecycle::apply_edit(&mut a, ts(5, 9), Some(ts(5, 18)), "stayed late", ts(6, 10))
            .unwrap();
        let mut b = completed("2", "e2", 5, 9, 17);
        lifecycle::apply_edit(&mut b, ts(5, 8), Some(ts(5, 17)), "early start", ts(7, 10))
            .unwrap();
        lifecycle::apply_edit(&mut a, ts(5, 9), Some(ts(5, 19)), "even later", ts(8, 10))
            .unwrap();

        let trail = audit_trail(&[a, b]);
        assert_eq!(trail.len(), 3);
        let reasons: Vec<&str> = trail.iter().map(|e| e.record.reason.as_str()).collect();
        assert_eq!(reasons, vec!["even later", "early start", "stayed late"]);
        assert_eq!(trail[0].log_id, "1");
        assert_eq!(trail[0].employee_id, "e1");
    }
}
