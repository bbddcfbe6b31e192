//! Typed failures for the attendance store, rules engine and export.
//!
//! Every store and rules operation returns [`AppResult`]. The command layer
//! converts these into `anyhow` errors and prints them through the message
//! macros; nothing is retried. A failed operation leaves previously committed
//! state untouched because every write runs inside a single statement or
//! transaction.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Shorthand for results produced by the store and rules components.
pub type AppResult<T> = Result<T, AppError>;

/// Every failure the application can surface to a user.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or a value could not be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A unique constraint rejected the write.
    #[error("{0} already exists")]
    DuplicateKey(String),

    /// A lookup did not match anything.
    #[error("{0} not found")]
    NotFound(String),

    /// The employee already has an open clock-in for the day.
    #[error("Employee '{code}' is already clocked in for {date}")]
    AlreadyOpen { code: String, date: String },

    /// There is no open clock-in to close for the day.
    #[error("No clock-in record found for employee '{code}' on {date}")]
    NoOpenRecord { code: String, date: String },

    /// Writing the report file failed.
    #[error("Failed to export report: {0}")]
    ExportFailure(String),

    #[error("Credential hashing failed: {0}")]
    Credentials(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl AppError {
    /// Maps a unique-constraint violation onto [`AppError::DuplicateKey`],
    /// leaving every other database error as is.
    pub fn from_insert(err: rusqlite::Error, subject: impl Into<String>) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation && is_unique_violation(e.extended_code) => {
                AppError::DuplicateKey(subject.into())
            }
            _ => AppError::Database(err),
        }
    }
}

// SQLITE_CONSTRAINT_UNIQUE and SQLITE_CONSTRAINT_PRIMARYKEY
fn is_unique_violation(extended_code: i32) -> bool {
    extended_code == 2067 || extended_code == 1555
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::ExportFailure(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ExportFailure(err.to_string())
    }
}
