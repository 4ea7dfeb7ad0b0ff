//! In-memory record store with failure injection.
//!
//! Backs the test suite: same contract as the SQLite adapter, plus a knob
//! to make the next N calls fail so the reconciliation paths (reload on
//! error, partial reset) can be exercised deterministically.

use super::{Filter, Identity, RecordStore, Row};
use crate::errors::{AppError, AppResult};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, Vec<Row>>,
    admins: Vec<(String, String, String)>,
    next_id: u64,
    skip_calls: u32,
    fail_calls: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` mutating or reading calls with a store error.
    pub fn fail_next(&mut self, n: u32) {
        self.fail_after(0, n);
    }

    /// Let `skip` calls through, then fail the following `n`.
    pub fn fail_after(&mut self, skip: u32, n: u32) {
        self.skip_calls = skip;
        self.fail_calls = n;
    }

    fn check_failure(&mut self) -> AppResult<()> {
        if self.skip_calls > 0 {
            self.skip_calls -= 1;
            return Ok(());
        }
        if self.fail_calls > 0 {
            self.fail_calls -= 1;
            return Err(AppError::Store("injected failure".to_string()));
        }
        Ok(())
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("srv-{}", self.next_id)
    }

    fn table(&mut self, name: &str) -> &mut Vec<Row> {
        self.tables.entry(name.to_string()).or_default()
    }

    /// Direct read access for assertions, bypassing failure injection.
    pub fn rows(&self, table: &str) -> &[Row] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RecordStore for MemoryStore {
    fn select(&mut self, table: &str, filters: &[Filter]) -> AppResult<Vec<Row>> {
        self.check_failure()?;
        let filters = filters.to_vec();
        Ok(self
            .table(table)
            .iter()
            .filter(|row| filters.iter().all(|f| f.matches(row)))
            .cloned()
            .collect())
    }

    fn insert(&mut self, table: &str, rows: Vec<Row>) -> AppResult<Vec<Row>> {
        self.check_failure()?;
        let mut stored = Vec::with_capacity(rows.len());
        for mut row in rows {
            row.insert("id".to_string(), Value::String(self.fresh_id()));
            self.table(table).push(row.clone());
            stored.push(row);
        }
        Ok(stored)
    }

    fn update(&mut self, table: &str, patch: Row, filters: &[Filter]) -> AppResult<()> {
        self.check_failure()?;
        let filters = filters.to_vec();
        for row in self.table(table).iter_mut() {
            if filters.iter().all(|f| f.matches(row)) {
                for (k, v) in &patch {
                    row.insert(k.clone(), v.clone());
                }
            }
        }
        Ok(())
    }

    fn delete(&mut self, table: &str, filters: &[Filter]) -> AppResult<()> {
        self.check_failure()?;
        let filters = filters.to_vec();
        self.table(table)
            .retain(|row| !filters.iter().all(|f| f.matches(row)));
        Ok(())
    }

    fn verify_credentials(&mut self, email: &str, password: &str) -> AppResult<Identity> {
        self.check_failure()?;
        self.admins
            .iter()
            .find(|(_, e, p)| e == email && p == password)
            .map(|(id, e, _)| Identity {
                id: id.clone(),
                email: e.clone(),
            })
            .ok_or(AppError::BadCredentials)
    }

    fn create_identity(&mut self, email: &str, password: &str) -> AppResult<Identity> {
        self.check_failure()?;
        let id = self.fresh_id();
        self.admins
            .push((id.clone(), email.to_string(), password.to_string()));
        Ok(Identity {
            id,
            email: email.to_string(),
        })
    }
}
