//! Unified application error type.
//! All modules (store, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Store error: {0}")]
    Store(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Row conversion error: {0}")]
    RowConversion(#[from] serde_json::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid month format (expected YYYY-MM): {0}")]
    InvalidMonth(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("No employee found matching '{0}'")]
    EmployeeNotFound(String),

    #[error("No time log found with id {0}")]
    LogNotFound(String),

    #[error("No planned shift with id {0}")]
    ShiftNotFound(String),

    #[error("{0} is already clocked in")]
    AlreadyClockedIn(String),

    #[error("An edit reason is required")]
    MissingReason,

    #[error("System not initialized: run `levant setup` first")]
    NeedsSetup,

    // ---------------------------
    // Auth errors
    // ---------------------------
    #[error("Incorrect PIN code")]
    WrongPin,

    #[error("Invalid PIN: must be 4 to 6 characters")]
    InvalidPin,

    #[error("Email or password incorrect")]
    BadCredentials,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
