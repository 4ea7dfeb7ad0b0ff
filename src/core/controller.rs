//! Application state controller.
//!
//! Owns the in-memory employee and log collections and mediates every
//! mutation through an optimistic-update-then-reconcile protocol against
//! the record store:
//!
//! - inserts go in locally under a temporary `tmp-N` id, then the store's
//!   authoritative row replaces the placeholder;
//! - updates are applied locally first and pushed by id;
//! - any store failure is logged to the operator channel and answered with
//!   a full reload, discarding all optimistic state since the last
//!   successful load. Deliberately blunt: one terminal, a handful of staff
//!   per shift, no fine-grained conflict resolution.
//!
//! Routine clock actions never surface failure to the person at the
//! terminal; the two destructive bulk operations report a boolean so the
//! admin can retry.

use crate::core::lifecycle;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, LogStatus, Role, Settings, Shift, TimeLog};
use crate::store::{Filter, RecordStore, Row, convert};
use crate::ui::messages;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    /// No settings row exists yet: first-run setup required.
    NeedsSetup,
}

pub struct Controller<S: RecordStore> {
    store: S,
    employees: Vec<Employee>,
    logs: Vec<TimeLog>,
    shifts: Vec<Shift>,
    settings: Option<Settings>,
    next_temp_id: u64,
}

fn to_wire<T: Serialize>(value: &T) -> AppResult<Row> {
    let wire = convert::to_snake_case(serde_json::to_value(value)?);
    match wire {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Other("entity did not serialize to an object".into())),
    }
}

fn from_wire<T: DeserializeOwned>(row: Row) -> AppResult<T> {
    Ok(serde_json::from_value(convert::to_camel_case(
        Value::Object(row),
    ))?)
}

/// Wire row for an insert: the temporary local id never crosses the
/// boundary, the store assigns the durable one.
fn insert_row<T: Serialize>(value: &T) -> AppResult<Row> {
    let mut row = to_wire(value)?;
    row.remove("id");
    Ok(row)
}

impl<S: RecordStore> Controller<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            employees: Vec::new(),
            logs: Vec::new(),
            shifts: Vec::new(),
            settings: None,
            next_temp_id: 0,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn logs(&self) -> &[TimeLog] {
        &self.logs
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Find an active employee by id or case-insensitive name.
    pub fn find_employee(&self, query: &str) -> AppResult<&Employee> {
        self.employees
            .iter()
            .filter(|e| e.is_active)
            .find(|e| e.id == query || e.name.eq_ignore_ascii_case(query))
            .ok_or_else(|| AppError::EmployeeNotFound(query.to_string()))
    }

    pub fn employee_name(&self, id: &str) -> String {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    // ------------------------------------------------------------------
    // Load & reconciliation plumbing
    // ------------------------------------------------------------------

    /// Fetch authoritative state. Runs retention cleanup first so expired
    /// logs are gone both remotely and locally after every load.
    pub fn load(&mut self, today: NaiveDate) -> AppResult<LoadOutcome> {
        let settings_rows = self.store.select("settings", &[])?;
        let Some(row) = settings_rows.into_iter().next() else {
            self.settings = None;
            self.employees.clear();
            self.logs.clear();
            self.shifts.clear();
            return Ok(LoadOutcome::NeedsSetup);
        };
        self.settings = Some(from_wire(row)?);

        let cutoff = lifecycle::retention_cutoff(today);
        self.store.delete(
            "time_logs",
            &[Filter::lt("date", cutoff.format("%Y-%m-%d").to_string())],
        )?;

        let mut employees = Vec::new();
        for row in self.store.select("employees", &[])? {
            employees.push(from_wire(row)?);
        }
        self.employees = employees;

        let mut logs = Vec::new();
        for row in self.store.select("time_logs", &[])? {
            logs.push(from_wire(row)?);
        }
        self.logs = logs;

        let mut shifts = Vec::new();
        for row in self.store.select("shifts", &[])? {
            shifts.push(from_wire(row)?);
        }
        self.shifts = shifts;

        Ok(LoadOutcome::Ready)
    }

    fn temp_id(&mut self) -> String {
        self.next_temp_id += 1;
        format!("tmp-{}", self.next_temp_id)
    }

    /// Blunt correction after a failed store call: log and refetch,
    /// dropping every optimistic mutation since the last good load.
    fn recover(&mut self, context: &str, err: AppError) {
        messages::error(format!("{context}: {err}"));
        if let Err(reload_err) = self.load(Utc::now().date_naive()) {
            messages::error(format!("reload after failure also failed: {reload_err}"));
        }
    }

    /// Pattern A: optimistic insert of a time log.
    fn push_log(&mut self, mut log: TimeLog, context: &str) -> AppResult<()> {
        let tmp = self.temp_id();
        log.id = tmp.clone();
        let row = insert_row(&log)?;
        self.logs.push(log);

        match self.store.insert("time_logs", vec![row]) {
            Ok(rows) => {
                if let Some(stored) = rows.into_iter().next() {
                    let stored: TimeLog = from_wire(stored)?;
                    if let Some(slot) = self.logs.iter_mut().find(|l| l.id == tmp) {
                        *slot = stored;
                    }
                }
                Ok(())
            }
            Err(err) => {
                self.recover(context, err);
                Ok(())
            }
        }
    }

    /// Pattern B: the local collection already reflects the change; push
    /// the patch by id and reload on failure.
    fn push_log_patch(&mut self, log_id: &str, patch: Row, context: &str) {
        if let Err(err) = self
            .store
            .update("time_logs", patch, &[Filter::eq("id", log_id)])
        {
            self.recover(context, err);
        }
    }

    fn push_employee_patch(&mut self, employee_id: &str, patch: Row, context: &str) {
        if let Err(err) =
            self.store
                .update("employees", patch, &[Filter::eq("id", employee_id)])
        {
            self.recover(context, err);
        }
    }

    // ------------------------------------------------------------------
    // Clock actions (failure is silent to the operator's screen)
    // ------------------------------------------------------------------

    /// Clock an employee in. Refused while an active log exists; the
    /// store round trip is synchronous here, so the double-tap race of a
    /// shared touch terminal cannot produce two active logs.
    pub fn clock_in(&mut self, employee_id: &str, now: DateTime<Utc>) -> AppResult<()> {
        if self
            .logs
            .iter()
            .any(|l| l.employee_id == employee_id && l.is_active())
        {
            return Err(AppError::AlreadyClockedIn(self.employee_name(employee_id)));
        }
        self.push_log(lifecycle::clock_in_log(employee_id, now), "clock-in failed")
    }

    /// Clock an employee out. A defined no-op when no active log exists.
    pub fn clock_out(&mut self, employee_id: &str, now: DateTime<Utc>) -> AppResult<()> {
        let Some(log) = self
            .logs
            .iter_mut()
            .find(|l| l.employee_id == employee_id && l.is_active())
        else {
            return Ok(());
        };

        lifecycle::apply_clock_out(log, now);
        let log_id = log.id.clone();
        let patch = wire_patch(&[
            ("clock_out", serde_json::to_value(now)?),
            ("status", serde_json::to_value(LogStatus::Completed)?),
        ]);
        self.push_log_patch(&log_id, patch, "clock-out failed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Staff management
    // ------------------------------------------------------------------

    pub fn add_employee(&mut self, name: &str, role: Role) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::Other("employee name must not be empty".into()));
        }

        let tmp = self.temp_id();
        let employee = Employee::new(tmp.clone(), name.trim(), role);
        let row = insert_row(&employee)?;
        self.employees.push(employee);

        match self.store.insert("employees", vec![row]) {
            Ok(rows) => {
                if let Some(stored) = rows.into_iter().next() {
                    let stored: Employee = from_wire(stored)?;
                    if let Some(slot) = self.employees.iter_mut().find(|e| e.id == tmp) {
                        *slot = stored;
                    }
                }
                Ok(())
            }
            Err(err) => {
                self.recover("adding employee failed", err);
                Ok(())
            }
        }
    }

    pub fn edit_employee(&mut self, id: &str, name: &str, role: Role) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::Other("employee name must not be empty".into()));
        }
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            return Err(AppError::EmployeeNotFound(id.to_string()));
        };
        employee.name = name.trim().to_string();
        employee.role = role;

        let patch = wire_patch(&[
            ("name", Value::String(name.trim().to_string())),
            ("role", serde_json::to_value(role)?),
        ]);
        self.push_employee_patch(id, patch, "updating employee failed");
        Ok(())
    }

    /// Soft removal: deactivation hides the employee from clock-in while
    /// historical logs stay addressable by id.
    pub fn deactivate_employee(&mut self, id: &str) -> AppResult<()> {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            return Err(AppError::EmployeeNotFound(id.to_string()));
        };
        employee.is_active = false;

        let patch = wire_patch(&[("is_active", Value::Bool(false))]);
        self.push_employee_patch(id, patch, "removing employee failed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Week roster
    // ------------------------------------------------------------------

    pub fn add_shift(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<()> {
        let tmp = self.temp_id();
        let shift = Shift {
            id: tmp.clone(),
            employee_id: employee_id.to_string(),
            date,
            start_time: start,
            end_time: end,
        };
        let row = insert_row(&shift)?;
        self.shifts.push(shift);

        match self.store.insert("shifts", vec![row]) {
            Ok(rows) => {
                if let Some(stored) = rows.into_iter().next() {
                    let stored: Shift = from_wire(stored)?;
                    if let Some(slot) = self.shifts.iter_mut().find(|s| s.id == tmp) {
                        *slot = stored;
                    }
                }
                Ok(())
            }
            Err(err) => {
                self.recover("planning shift failed", err);
                Ok(())
            }
        }
    }

    pub fn remove_shift(&mut self, id: &str) -> AppResult<()> {
        if !self.shifts.iter().any(|s| s.id == id) {
            return Err(AppError::ShiftNotFound(id.to_string()));
        }
        self.shifts.retain(|s| s.id != id);
        if let Err(err) = self.store.delete("shifts", &[Filter::eq("id", id)]) {
            self.recover("removing shift failed", err);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin log operations
    // ------------------------------------------------------------------

    pub fn add_log(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        clock_in: DateTime<Utc>,
        clock_out: Option<DateTime<Utc>>,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let log = lifecycle::manual_log(employee_id, date, clock_in, clock_out, reason, now);
        self.push_log(log, "adding hours failed")
    }

    pub fn edit_log(
        &mut self,
        log_id: &str,
        new_in: DateTime<Utc>,
        new_out: Option<DateTime<Utc>>,
        reason: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let Some(log) = self.logs.iter_mut().find(|l| l.id == log_id) else {
            return Err(AppError::LogNotFound(log_id.to_string()));
        };

        lifecycle::apply_edit(log, new_in, new_out, reason, now)?;

        let patch = wire_patch(&[
            ("clock_in", serde_json::to_value(new_in)?),
            ("clock_out", serde_json::to_value(new_out)?),
            ("status", serde_json::to_value(log.status)?),
            (
                "edits",
                convert::to_snake_case(serde_json::to_value(&log.edits)?),
            ),
        ]);
        self.push_log_patch(log_id, patch, "editing log failed");
        Ok(())
    }

    /// Delete every completed log; active shifts are preserved.
    /// All-or-nothing: local state is only pruned after the store delete
    /// succeeded. Returns false on failure so the caller can offer retry.
    pub fn delete_completed(&mut self) -> bool {
        if let Err(err) = self
            .store
            .delete("time_logs", &[Filter::eq("status", "completed")])
        {
            messages::error(format!("deleting completed logs failed: {err}"));
            return false;
        }
        self.logs.retain(|l| l.is_active());
        true
    }

    /// Delete all logs, employees, and settings. Sequential; the first
    /// failing step aborts with no compensating rollback, so a failure
    /// partway can leave the store mixed until the admin retries.
    pub fn full_reset(&mut self) -> bool {
        if let Err(err) = self.store.delete("time_logs", &[]) {
            messages::error(format!("reset of time logs failed: {err}"));
            return false;
        }
        if let Err(err) = self.store.delete("employees", &[]) {
            messages::error(format!("reset of employees failed: {err}"));
            return false;
        }
        if let Err(err) = self.store.delete("settings", &[]) {
            messages::error(format!("reset of settings failed: {err}"));
            return false;
        }
        self.logs.clear();
        self.employees.clear();
        self.settings = None;
        true
    }

    // ------------------------------------------------------------------
    // Settings & authentication
    // ------------------------------------------------------------------

    /// First-run setup: register the admin identity and store the PIN.
    pub fn setup(&mut self, email: &str, password: &str, pin: &str) -> AppResult<()> {
        validate_pin(pin)?;
        let identity = self.store.create_identity(email, password)?;

        let mut row = Row::new();
        row.insert("pin_code".to_string(), Value::String(pin.to_string()));
        row.insert("admin_user_id".to_string(), Value::String(identity.id));
        let stored = self.store.insert("settings", vec![row])?;
        if let Some(row) = stored.into_iter().next() {
            self.settings = Some(from_wire(row)?);
        }
        Ok(())
    }

    /// Exact string match against the settings row. No lockout, no
    /// backoff; the terminal sits behind the bar.
    pub fn verify_pin(&self, pin: &str) -> AppResult<()> {
        let settings = self.settings.as_ref().ok_or(AppError::NeedsSetup)?;
        if settings.pin_code == pin {
            Ok(())
        } else {
            Err(AppError::WrongPin)
        }
    }

    /// Change the PIN after re-verifying the admin credentials.
    pub fn change_pin(&mut self, email: &str, password: &str, new_pin: &str) -> AppResult<()> {
        validate_pin(new_pin)?;
        self.store.verify_credentials(email, password)?;

        let patch = wire_patch(&[("pin_code", Value::String(new_pin.to_string()))]);
        self.store.update("settings", patch, &[])?;
        if let Some(settings) = self.settings.as_mut() {
            settings.pin_code = new_pin.to_string();
        }
        Ok(())
    }
}

fn wire_patch(fields: &[(&str, Value)]) -> Row {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn validate_pin(pin: &str) -> AppResult<()> {
    if (4..=6).contains(&pin.chars().count()) {
        Ok(())
    } else {
        Err(AppError::InvalidPin)
    }
}
