//! Record store boundary.
//!
//! Everything above this module speaks in rows: `serde_json` maps with
//! snake_case keys, the wire convention of the backing store. Domain types
//! serialize with camelCase fields; [`convert`] flips the keys in both
//! directions at the boundary.

pub mod convert;
pub mod memory;
pub mod migrate;
pub mod sqlite;

use crate::errors::AppResult;
use serde_json::Value;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A single wire row: snake_case keys, JSON values.
pub type Row = serde_json::Map<String, Value>;

/// An authenticated admin identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Lt,
    Gte,
}

/// Column predicate for select/update/delete. An empty filter list means
/// every row in the table.
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    fn new(column: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.to_string(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Eq, value)
    }

    pub fn neq(column: &str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Neq, value)
    }

    pub fn lt(column: &str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Lt, value)
    }

    pub fn gte(column: &str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Gte, value)
    }

    /// Predicate evaluation over a wire row. String comparison is
    /// lexicographic, which is what date columns rely on.
    pub fn matches(&self, row: &Row) -> bool {
        let cell = row.get(&self.column).unwrap_or(&Value::Null);
        match self.op {
            FilterOp::Eq => cell == &self.value,
            FilterOp::Neq => cell != &self.value,
            FilterOp::Lt => match (cell.as_str(), self.value.as_str()) {
                (Some(a), Some(b)) => a < b,
                _ => compare_numbers(cell, &self.value, |a, b| a < b),
            },
            FilterOp::Gte => match (cell.as_str(), self.value.as_str()) {
                (Some(a), Some(b)) => a >= b,
                _ => compare_numbers(cell, &self.value, |a, b| a >= b),
            },
        }
    }
}

fn compare_numbers(a: &Value, b: &Value, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Generic remote table access plus credential operations. The store owns
/// the durable copy of every entity and is the arbiter of truth whenever
/// the in-memory state diverges from it.
pub trait RecordStore {
    /// Rows matching every filter (all rows for an empty filter list).
    fn select(&mut self, table: &str, filters: &[Filter]) -> AppResult<Vec<Row>>;

    /// Insert rows and return them as stored, with server-assigned ids.
    fn insert(&mut self, table: &str, rows: Vec<Row>) -> AppResult<Vec<Row>>;

    /// Apply `patch` to every matching row.
    fn update(&mut self, table: &str, patch: Row, filters: &[Filter]) -> AppResult<()>;

    /// Delete every matching row.
    fn delete(&mut self, table: &str, filters: &[Filter]) -> AppResult<()>;

    /// Exact-match credential check against the admin identities.
    fn verify_credentials(&mut self, email: &str, password: &str) -> AppResult<Identity>;

    /// Register a new admin identity.
    fn create_identity(&mut self, email: &str, password: &str) -> AppResult<Identity>;
}
