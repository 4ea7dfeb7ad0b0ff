//! Schema creation and the per-table column catalog.
//!
//! The catalog is what lets the SQLite adapter stay generic: every wire row
//! is mapped column-by-column according to the declared kind, so nested
//! structures (the `edits` history) round-trip through a JSON text column
//! without the adapter knowing anything about time logs.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColKind {
    /// Integer rowid, surfaced as an opaque string id on the wire.
    Id,
    Text,
    Bool,
    /// Arbitrary JSON stored as text.
    Json,
}

pub struct ColSpec {
    pub name: &'static str,
    pub kind: ColKind,
}

pub struct TableSpec {
    pub name: &'static str,
    pub cols: &'static [ColSpec],
}

const fn col(name: &'static str, kind: ColKind) -> ColSpec {
    ColSpec { name, kind }
}

pub const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "settings",
        cols: &[
            col("id", ColKind::Id),
            col("pin_code", ColKind::Text),
            col("admin_user_id", ColKind::Text),
        ],
    },
    TableSpec {
        name: "employees",
        cols: &[
            col("id", ColKind::Id),
            col("name", ColKind::Text),
            col("role", ColKind::Text),
            col("is_active", ColKind::Bool),
        ],
    },
    TableSpec {
        name: "time_logs",
        cols: &[
            col("id", ColKind::Id),
            col("employee_id", ColKind::Text),
            col("date", ColKind::Text),
            col("clock_in", ColKind::Text),
            col("clock_out", ColKind::Text),
            col("status", ColKind::Text),
            col("edits", ColKind::Json),
        ],
    },
    TableSpec {
        name: "shifts",
        cols: &[
            col("id", ColKind::Id),
            col("employee_id", ColKind::Text),
            col("date", ColKind::Text),
            col("start_time", ColKind::Text),
            col("end_time", ColKind::Text),
        ],
    },
];

pub fn table_spec(name: &str) -> AppResult<&'static TableSpec> {
    TABLES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| AppError::UnknownTable(name.to_string()))
}

/// Create all tables and indexes. Idempotent; invoked on every open.
pub fn run(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            pin_code      TEXT NOT NULL,
            admin_user_id TEXT
        );

        CREATE TABLE IF NOT EXISTS employees (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL,
            role      TEXT NOT NULL CHECK(role IN ('Server','Kitchen','Bar','Manager')),
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS time_logs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id TEXT NOT NULL,
            date        TEXT NOT NULL,
            clock_in    TEXT NOT NULL,
            clock_out   TEXT,
            status      TEXT NOT NULL CHECK(status IN ('active','completed')),
            edits       TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS shifts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id TEXT NOT NULL,
            date        TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS admins (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            email    TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_time_logs_employee_status
            ON time_logs(employee_id, status);
        CREATE INDEX IF NOT EXISTS idx_time_logs_date
            ON time_logs(date);
        "#,
    )?;
    Ok(())
}
