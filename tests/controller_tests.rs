//! Reconciliation behaviour of the controller against an in-memory store
//! with failure injection.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use levant::core::controller::{Controller, LoadOutcome};
use levant::errors::AppError;
use levant::models::{LogStatus, Role};
use levant::store::MemoryStore;

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, h, m, 0).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// A controller with settings and one employee ("Maya"), freshly loaded.
fn ready_controller() -> (Controller<MemoryStore>, String) {
    let mut controller = Controller::new(MemoryStore::new());
    controller
        .setup("admin@example.com", "hunter2", "1234")
        .expect("setup");
    assert_eq!(controller.load(today()).expect("load"), LoadOutcome::Ready);
    controller.add_employee("Maya", Role::Server).expect("add");
    let id = controller.employees()[0].id.clone();
    (controller, id)
}

#[test]
fn load_without_settings_asks_for_setup() {
    let mut controller = Controller::new(MemoryStore::new());
    assert_eq!(
        controller.load(today()).expect("load"),
        LoadOutcome::NeedsSetup
    );
}

#[test]
fn optimistic_insert_gets_the_server_id() {
    let (mut controller, emp) = ready_controller();
    controller.clock_in(&emp, at(9, 0)).expect("clock in");

    assert_eq!(controller.logs().len(), 1);
    let log = &controller.logs()[0];
    assert!(log.id.starts_with("srv-"), "placeholder id survived: {}", log.id);
    assert!(log.is_active());

    // The store holds the same row.
    let rows = controller.store_mut().rows("time_logs");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("status").and_then(|v| v.as_str()), Some("active"));
}

#[test]
fn failed_insert_reloads_and_discards_the_optimistic_log() {
    let (mut controller, emp) = ready_controller();

    controller.store_mut().fail_next(1);
    controller.clock_in(&emp, at(9, 0)).expect("clock in");

    // Nothing on either side: the reload threw the optimistic row away.
    assert!(controller.logs().is_empty());
    assert!(controller.store_mut().rows("time_logs").is_empty());

    // And the terminal is usable again afterwards.
    controller.clock_in(&emp, at(9, 5)).expect("retry");
    assert_eq!(controller.logs().len(), 1);
}

#[test]
fn second_clock_in_is_refused() {
    let (mut controller, emp) = ready_controller();
    controller.clock_in(&emp, at(9, 0)).expect("clock in");

    let err = controller.clock_in(&emp, at(9, 1));
    assert!(matches!(err, Err(AppError::AlreadyClockedIn(_))));
    assert_eq!(controller.logs().len(), 1);
}

#[test]
fn clock_out_without_active_log_is_a_no_op() {
    let (mut controller, emp) = ready_controller();
    controller.clock_out(&emp, at(17, 0)).expect("clock out");
    assert!(controller.logs().is_empty());
}

#[test]
fn clock_out_completes_locally_and_remotely() {
    let (mut controller, emp) = ready_controller();
    controller.clock_in(&emp, at(9, 0)).expect("clock in");
    controller.clock_out(&emp, at(17, 30)).expect("clock out");

    let log = &controller.logs()[0];
    assert_eq!(log.status, LogStatus::Completed);
    assert_eq!(log.hours(), Some(8.5));

    let rows = controller.store_mut().rows("time_logs");
    assert_eq!(rows[0].get("status").and_then(|v| v.as_str()), Some("completed"));
}

#[test]
fn failed_patch_reverts_the_local_change() {
    let (mut controller, emp) = ready_controller();

    controller.store_mut().fail_next(1);
    controller
        .edit_employee(&emp, "Mia", Role::Bar)
        .expect("edit");

    // The reload restored the stored name.
    assert_eq!(controller.employees()[0].name, "Maya");
    assert_eq!(controller.employees()[0].role, Role::Server);
}

#[test]
fn edit_writes_the_audit_record_to_the_store() {
    let (mut controller, emp) = ready_controller();
    controller.clock_in(&emp, at(9, 0)).expect("clock in");
    let log_id = controller.logs()[0].id.clone();

    controller
        .edit_log(&log_id, at(8, 30), Some(at(17, 0)), "forgot to clock out", at(18, 0))
        .expect("edit");

    let log = &controller.logs()[0];
    assert_eq!(log.edits.len(), 1);
    assert_eq!(log.edits[0].previous_in, Some(at(9, 0)));
    assert_eq!(log.edits[0].new_out, Some(at(17, 0)));

    // The stored row carries the edit in snake_case wire form.
    let rows = controller.store_mut().rows("time_logs");
    let edits = rows[0].get("edits").and_then(|v| v.as_array()).expect("edits");
    assert_eq!(edits.len(), 1);
    assert!(edits[0].get("previous_in").is_some());
    assert_eq!(
        edits[0].get("admin_name").and_then(|v| v.as_str()),
        Some("Admin")
    );
}

#[test]
fn edit_without_reason_changes_nothing() {
    let (mut controller, emp) = ready_controller();
    controller.clock_in(&emp, at(9, 0)).expect("clock in");
    let log_id = controller.logs()[0].id.clone();

    let err = controller.edit_log(&log_id, at(8, 0), None, "   ", at(10, 0));
    assert!(matches!(err, Err(AppError::MissingReason)));
    assert!(controller.logs()[0].edits.is_empty());
    assert_eq!(controller.logs()[0].clock_in, at(9, 0));
}

#[test]
fn delete_completed_keeps_the_active_shift() {
    let (mut controller, emp) = ready_controller();
    controller
        .add_log(&emp, today(), at(9, 0), Some(at(17, 0)), None, at(18, 0))
        .expect("add log");
    controller.clock_in(&emp, at(18, 30)).expect("clock in");

    assert!(controller.delete_completed());

    assert_eq!(controller.logs().len(), 1);
    assert!(controller.logs()[0].is_active());
    let rows = controller.store_mut().rows("time_logs");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("status").and_then(|v| v.as_str()), Some("active"));
}

#[test]
fn failed_delete_completed_leaves_everything_in_place() {
    let (mut controller, emp) = ready_controller();
    controller
        .add_log(&emp, today(), at(9, 0), Some(at(17, 0)), None, at(18, 0))
        .expect("add log");

    controller.store_mut().fail_next(1);
    assert!(!controller.delete_completed());

    assert_eq!(controller.logs().len(), 1);
    assert_eq!(controller.store_mut().rows("time_logs").len(), 1);
}

#[test]
fn reset_failing_partway_deletes_nothing_further() {
    let (mut controller, emp) = ready_controller();
    controller
        .add_log(&emp, today(), at(9, 0), Some(at(17, 0)), None, at(18, 0))
        .expect("add log");

    // Logs delete goes through, the employees delete fails.
    controller.store_mut().fail_after(1, 1);
    assert!(!controller.full_reset());

    let store = controller.store_mut();
    assert!(store.rows("time_logs").is_empty(), "first step persisted");
    assert_eq!(store.rows("employees").len(), 1, "second step failed");
    assert_eq!(store.rows("settings").len(), 1, "third step never ran");

    // A retry finishes the job.
    assert!(controller.full_reset());
    assert!(controller.store_mut().rows("employees").is_empty());
    assert!(controller.store_mut().rows("settings").is_empty());
    assert_eq!(controller.load(today()).expect("load"), LoadOutcome::NeedsSetup);
}

#[test]
fn load_purges_logs_older_than_three_months() {
    let (mut controller, emp) = ready_controller();

    // Boundary date survives, one day older is purged.
    let boundary = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let older = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    controller
        .add_log(&emp, boundary, at(9, 0), Some(at(17, 0)), None, at(18, 0))
        .expect("boundary log");
    controller
        .add_log(&emp, older, at(9, 0), Some(at(17, 0)), None, at(18, 0))
        .expect("older log");

    assert_eq!(controller.load(today()).expect("load"), LoadOutcome::Ready);

    let dates: Vec<NaiveDate> = controller.logs().iter().map(|l| l.date).collect();
    assert_eq!(dates, vec![boundary]);
    assert_eq!(controller.store_mut().rows("time_logs").len(), 1);
}

#[test]
fn planned_shifts_round_trip_and_removal() {
    let (mut controller, emp) = ready_controller();
    let day = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
    let start = chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap();
    let end = chrono::NaiveTime::from_hms_opt(23, 0, 0).unwrap();

    controller.add_shift(&emp, day, start, end).expect("plan");
    assert_eq!(controller.shifts().len(), 1);
    let shift_id = controller.shifts()[0].id.clone();
    assert!(shift_id.starts_with("srv-"));

    // Survives a reload.
    assert_eq!(controller.load(today()).expect("load"), LoadOutcome::Ready);
    assert_eq!(controller.shifts().len(), 1);
    assert_eq!(controller.shifts()[0].start_time, start);

    controller.remove_shift(&shift_id).expect("remove");
    assert!(controller.shifts().is_empty());
    assert!(controller.store_mut().rows("shifts").is_empty());

    assert!(matches!(
        controller.remove_shift(&shift_id),
        Err(AppError::ShiftNotFound(_))
    ));
}

#[test]
fn wrong_pin_is_rejected_without_lockout() {
    let (controller, _) = ready_controller();
    for _ in 0..5 {
        assert!(matches!(controller.verify_pin("0000"), Err(AppError::WrongPin)));
    }
    controller.verify_pin("1234").expect("right pin still works");
}

#[test]
fn setup_rejects_out_of_range_pins() {
    let mut controller = Controller::new(MemoryStore::new());
    assert!(matches!(
        controller.setup("a@b.c", "pw", "12"),
        Err(AppError::InvalidPin)
    ));
    assert!(matches!(
        controller.setup("a@b.c", "pw", "1234567"),
        Err(AppError::InvalidPin)
    ));
}

#[test]
fn change_pin_requires_valid_credentials() {
    let (mut controller, _) = ready_controller();
    assert!(matches!(
        controller.change_pin("admin@example.com", "wrong", "5678"),
        Err(AppError::BadCredentials)
    ));
    controller
        .change_pin("admin@example.com", "hunter2", "5678")
        .expect("change pin");
    controller.verify_pin("5678").expect("new pin");
    assert!(matches!(controller.verify_pin("1234"), Err(AppError::WrongPin)));
}
