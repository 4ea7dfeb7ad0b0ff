//! Time-log lifecycle rules.
//!
//! Pure functions over [`TimeLog`]: construction on clock-in, completion on
//! clock-out, audited administrative edits, and the retention window. The
//! controller decides when these run and reconciles the results with the
//! store; nothing here touches storage.

use crate::errors::{AppError, AppResult};
use crate::models::{EditRecord, LogStatus, TimeLog};
use chrono::{DateTime, Months, NaiveDate, Utc};

/// Reason recorded when an admin adds hours without giving one.
pub const MANUAL_ADD_REASON: &str = "Manually added by admin";

/// Acting admin recorded on edits. A placeholder: the PIN gate does not
/// distinguish individual admins.
pub const ADMIN_DISPLAY_NAME: &str = "Admin";

/// Logs whose calendar date is older than this many months are purged on
/// every data load.
pub const RETENTION_MONTHS: u32 = 3;

/// A fresh log for an employee clocking in right now. The caller must have
/// checked that no active log exists for the employee; the id is assigned
/// by the controller.
pub fn clock_in_log(employee_id: &str, now: DateTime<Utc>) -> TimeLog {
    TimeLog {
        id: String::new(),
        employee_id: employee_id.to_string(),
        date: now.date_naive(),
        clock_in: now,
        clock_out: None,
        status: LogStatus::Active,
        edits: Vec::new(),
    }
}

/// Complete an active log. Completion is the only non-edit transition.
pub fn apply_clock_out(log: &mut TimeLog, now: DateTime<Utc>) {
    log.clock_out = Some(now);
    log.status = LogStatus::Completed;
}

/// A log entered directly by an admin. Carries one synthetic edit record
/// from birth: no previous values existed, the new values are the supplied
/// ones, and a missing reason falls back to a fixed string.
pub fn manual_log(
    employee_id: &str,
    date: NaiveDate,
    clock_in: DateTime<Utc>,
    clock_out: Option<DateTime<Utc>>,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> TimeLog {
    let reason = match reason {
        Some(r) if !r.trim().is_empty() => r.to_string(),
        _ => MANUAL_ADD_REASON.to_string(),
    };

    TimeLog {
        id: String::new(),
        employee_id: employee_id.to_string(),
        date,
        clock_in,
        clock_out,
        status: status_for(clock_out),
        edits: vec![EditRecord {
            date: now,
            previous_in: None,
            previous_out: None,
            new_in: Some(clock_in),
            new_out: clock_out,
            reason,
            admin_name: ADMIN_DISPLAY_NAME.to_string(),
        }],
    }
}

/// Administrative edit of a log's clock times.
///
/// Appends exactly one edit record capturing the current values as
/// "previous" and the supplied ones as "new", then overwrites the log.
/// Status is recomputed from the new clock-out. The reason is mandatory.
pub fn apply_edit(
    log: &mut TimeLog,
    new_in: DateTime<Utc>,
    new_out: Option<DateTime<Utc>>,
    reason: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if reason.trim().is_empty() {
        return Err(AppError::MissingReason);
    }

    log.edits.push(EditRecord {
        date: now,
        previous_in: Some(log.clock_in),
        previous_out: log.clock_out,
        new_in: Some(new_in),
        new_out,
        reason: reason.to_string(),
        admin_name: ADMIN_DISPLAY_NAME.to_string(),
    });

    log.clock_in = new_in;
    log.clock_out = new_out;
    log.status = status_for(new_out);
    Ok(())
}

fn status_for(clock_out: Option<DateTime<Utc>>) -> LogStatus {
    if clock_out.is_some() {
        LogStatus::Completed
    } else {
        LogStatus::Active
    }
}

/// First calendar date still inside the retention window. Logs dated
/// strictly before it are purged; a log dated exactly on the cutoff
/// survives.
pub fn retention_cutoff(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(RETENTION_MONTHS))
        .unwrap_or(today)
}

pub fn is_expired(log: &TimeLog, cutoff: NaiveDate) -> bool {
    log.date < cutoff
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).unwrap()
    }

    #[test]
    fn clock_in_creates_active_log_for_today() {
        let log = clock_in_log("e1", at(9, 0));
        assert_eq!(log.status, LogStatus::Active);
        assert_eq!(log.clock_out, None);
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(log.edits.is_empty());
    }

    #[test]
    fn clock_out_completes_the_log() {
        let mut log = clock_in_log("e1", at(9, 0));
        apply_clock_out(&mut log, at(17, 0));
        assert_eq!(log.status, LogStatus::Completed);
        assert_eq!(log.clock_out, Some(at(17, 0)));
    }

    #[test]
    fn manual_log_carries_one_synthetic_edit() {
        let log = manual_log(
            "e1",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            at(9, 0),
            Some(at(17, 0)),
            None,
            at(18, 0),
        );
        assert_eq!(log.status, LogStatus::Completed);
        assert_eq!(log.edits.len(), 1);
        let edit = &log.edits[0];
        assert_eq!(edit.previous_in, None);
        assert_eq!(edit.previous_out, None);
        assert_eq!(edit.new_in, Some(at(9, 0)));
        assert_eq!(edit.new_out, Some(at(17, 0)));
        assert_eq!(edit.reason, MANUAL_ADD_REASON);
    }

    #[test]
    fn manual_log_without_clock_out_is_active() {
        let log = manual_log(
            "e1",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            at(9, 0),
            None,
            Some("late entry"),
            at(10, 0),
        );
        assert_eq!(log.status, LogStatus::Active);
        assert_eq!(log.edits[0].reason, "late entry");
    }

    #[test]
    fn edit_appends_exactly_one_record_per_call() {
        let mut log = clock_in_log("e1", at(9, 0));
        apply_edit(&mut log, at(9, 0), Some(at(17, 0)), "forgot to clock out", at(18, 0))
            .unwrap();
        assert_eq!(log.edits.len(), 1);
        apply_edit(&mut log, at(8, 30), Some(at(17, 0)), "started earlier", at(19, 0))
            .unwrap();
        assert_eq!(log.edits.len(), 2);

        // First edit captured the pre-edit state.
        let first = &log.edits[0];
        assert_eq!(first.previous_in, Some(at(9, 0)));
        assert_eq!(first.previous_out, None);
        assert_eq!(first.new_out, Some(at(17, 0)));

        // Second edit's "previous" is the first edit's "new".
        let second = &log.edits[1];
        assert_eq!(second.previous_in, Some(at(9, 0)));
        assert_eq!(second.previous_out, Some(at(17, 0)));

        assert_eq!(log.clock_in, at(8, 30));
        assert_eq!(log.status, LogStatus::Completed);
    }

    #[test]
    fn edit_supplying_a_clock_out_completes_the_log() {
        let mut log = clock_in_log("e1", at(9, 0));
        apply_edit(&mut log, at(9, 0), Some(at(17, 0)), "forgot to clock out", at(18, 0))
            .unwrap();
        assert_eq!(log.status, LogStatus::Completed);
        assert_eq!(log.clock_out, Some(at(17, 0)));
    }

    #[test]
    fn edit_requires_a_reason() {
        let mut log = clock_in_log("e1", at(9, 0));
        let err = apply_edit(&mut log, at(9, 0), None, "  ", at(10, 0));
        assert!(matches!(err, Err(AppError::MissingReason)));
        assert!(log.edits.is_empty());
    }

    #[test]
    fn retention_boundary_date_survives() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let cutoff = retention_cutoff(today);
        assert_eq!(cutoff, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        let mut log = clock_in_log("e1", Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap());
        assert!(!is_expired(&log, cutoff));
        log.date = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        assert!(is_expired(&log, cutoff));
    }
}
