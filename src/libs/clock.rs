//! Attendance rules: the clock-in/clock-out state machine.
//!
//! For every employee and calendar date the state moves strictly forward:
//!
//! ```text
//! NoRecord ──clock in──▶ Open ──clock out──▶ Closed
//! ```
//!
//! - Clocking in while a record for the day is open fails with `AlreadyOpen`.
//! - Clocking out with no open record for the day fails with `NoOpenRecord`.
//! - A closed record is never reopened or rewritten. A later clock-in on the
//!   same day starts a new session (a new record), as long as nothing is open.
//!
//! Each check-and-write pair runs inside one immediate transaction, so the
//! open-record test and the write cannot interleave with another writer.

use crate::db::attendance::{self, AttendanceRecord, DATE_FORMAT};
use crate::db::db::Db;
use crate::db::employees;
use crate::libs::error::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;

/// Where an employee stands on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    NoRecord,
    /// The latest session of the day has no clock-out yet
    Open(AttendanceRecord),
    /// The latest session of the day is finished
    Closed(AttendanceRecord),
}

pub struct TimeClock {
    db: Db,
}

impl TimeClock {
    pub fn new() -> AppResult<Self> {
        Ok(TimeClock { db: Db::new()? })
    }

    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        Ok(TimeClock { db: Db::open(path)? })
    }

    /// Opens a session for the employee at the current local time.
    pub fn clock_in(&mut self, code: &str) -> AppResult<AttendanceRecord> {
        self.clock_in_at(code, Local::now().naive_local())
    }

    /// Closes today's open session of the employee at the current local time.
    pub fn clock_out(&mut self, code: &str) -> AppResult<AttendanceRecord> {
        self.clock_out_at(code, Local::now().naive_local())
    }

    /// Opens a session at `at`; the day is the calendar date of `at`.
    pub fn clock_in_at(&mut self, code: &str, at: NaiveDateTime) -> AppResult<AttendanceRecord> {
        let code = required_code(code)?;
        let at = whole_seconds(at);
        let date = at.date();

        let tx = self.db.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let employee_id = resolve_employee(&tx, code)?;

        if attendance::find_open(&tx, employee_id, date)?.is_some() {
            return Err(already_open(code, date));
        }

        let record = attendance::insert_clock_in(&tx, employee_id, at).map_err(|e| match e {
            AppError::DuplicateKey(_) => already_open(code, date),
            other => other,
        })?;
        tx.commit()?;

        tracing::debug!(code, record_id = record.id, %at, "clocked in");
        Ok(record)
    }

    /// Closes the open session of the day of `at`, stamping `at` as clock-out.
    pub fn clock_out_at(&mut self, code: &str, at: NaiveDateTime) -> AppResult<AttendanceRecord> {
        let code = required_code(code)?;
        let at = whole_seconds(at);
        let date = at.date();

        let tx = self.db.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let employee_id = resolve_employee(&tx, code)?;

        let mut record = attendance::find_open(&tx, employee_id, date)?.ok_or_else(|| no_open_record(code, date))?;
        if !attendance::close(&tx, record.id, at)? {
            return Err(no_open_record(code, date));
        }
        tx.commit()?;

        record.clock_out = Some(at);
        tracing::debug!(code, record_id = record.id, %at, "clocked out");
        Ok(record)
    }

    /// Reports the state of the latest session the employee has on `date`.
    pub fn day_status(&self, code: &str, date: NaiveDate) -> AppResult<DayStatus> {
        let code = required_code(code)?;
        let employee_id = resolve_employee(&self.db.conn, code)?;

        Ok(match attendance::find_latest_for_day(&self.db.conn, employee_id, date)? {
            None => DayStatus::NoRecord,
            Some(record) if record.is_open() => DayStatus::Open(record),
            Some(record) => DayStatus::Closed(record),
        })
    }
}

fn required_code(code: &str) -> AppResult<&str> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::InvalidInput("employee code is required".to_string()));
    }
    Ok(code)
}

fn resolve_employee(conn: &Connection, code: &str) -> AppResult<i64> {
    employees::find_id_by_code(conn, code)?.ok_or_else(|| AppError::NotFound(format!("Employee '{}'", code)))
}

// Stored timestamps carry no fractional seconds.
fn whole_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

fn already_open(code: &str, date: NaiveDate) -> AppError {
    AppError::AlreadyOpen {
        code: code.to_string(),
        date: date.format(DATE_FORMAT).to_string(),
    }
}

fn no_open_record(code: &str, date: NaiveDate) -> AppError {
    AppError::NoOpenRecord {
        code: code.to_string(),
        date: date.format(DATE_FORMAT).to_string(),
    }
}
