//! Clock-in/clock-out records.
//!
//! Each row is one working session of one employee on one calendar date.
//! A row with no `clock_out_time` is *open*; the store holds at most one open
//! row per employee and date (enforced by a partial unique index). Rows are
//! created on clock-in, updated once on clock-out and never deleted except
//! by the cascade from `employees`.
//!
//! Timestamps are local time stored as `YYYY-MM-DD HH:MM:SS`; dates as
//! `YYYY-MM-DD`.

use crate::db::db::Db;
use crate::libs::error::{AppError, AppResult};
use crate::libs::report::{ReportFilter, ReportQuery, ReportRow};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::path::Path;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INSERT_CLOCK_IN: &str = "INSERT INTO attendance (employee_id, clock_in_time, date) VALUES (?1, ?2, ?3)";
const UPDATE_CLOCK_OUT: &str = "UPDATE attendance SET clock_out_time = ?1 WHERE id = ?2 AND clock_out_time IS NULL";
const SELECT_OPEN: &str = "SELECT id, employee_id, clock_in_time, clock_out_time, date FROM attendance
    WHERE employee_id = ?1 AND date = ?2 AND clock_out_time IS NULL";
const SELECT_LATEST_FOR_DAY: &str = "SELECT id, employee_id, clock_in_time, clock_out_time, date FROM attendance
    WHERE employee_id = ?1 AND date = ?2 ORDER BY clock_in_time DESC, id DESC LIMIT 1";
const SELECT_FOR_EMPLOYEE: &str = "SELECT id, employee_id, clock_in_time, clock_out_time, date FROM attendance
    WHERE employee_id = ?1 ORDER BY date DESC, clock_in_time DESC";

/// One stored clock-in/clock-out session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    pub date: NaiveDate,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(AttendanceRecord {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            clock_in: row.get(2)?,
            clock_out: row.get(3)?,
            date: row.get(4)?,
        })
    }
}

pub(crate) fn find_open(conn: &Connection, employee_id: i64, date: NaiveDate) -> AppResult<Option<AttendanceRecord>> {
    let date = date.format(DATE_FORMAT).to_string();
    Ok(conn
        .query_row(SELECT_OPEN, params![employee_id, date], AttendanceRecord::from_row)
        .optional()?)
}

pub(crate) fn find_latest_for_day(conn: &Connection, employee_id: i64, date: NaiveDate) -> AppResult<Option<AttendanceRecord>> {
    let date = date.format(DATE_FORMAT).to_string();
    Ok(conn
        .query_row(SELECT_LATEST_FOR_DAY, params![employee_id, date], AttendanceRecord::from_row)
        .optional()?)
}

/// Writes a new open record. A concurrent open record for the same day
/// surfaces as `DuplicateKey` from the partial unique index.
pub(crate) fn insert_clock_in(conn: &Connection, employee_id: i64, at: NaiveDateTime) -> AppResult<AttendanceRecord> {
    let date = at.date();
    conn.execute(
        INSERT_CLOCK_IN,
        params![employee_id, at.format(TIMESTAMP_FORMAT).to_string(), date.format(DATE_FORMAT).to_string()],
    )
    .map_err(|e| AppError::from_insert(e, "Open attendance record"))?;

    Ok(AttendanceRecord {
        id: conn.last_insert_rowid(),
        employee_id,
        clock_in: at,
        clock_out: None,
        date,
    })
}

/// Closes an open record. Returns `false` when the record was already closed.
pub(crate) fn close(conn: &Connection, record_id: i64, at: NaiveDateTime) -> AppResult<bool> {
    let updated = conn.execute(UPDATE_CLOCK_OUT, params![at.format(TIMESTAMP_FORMAT).to_string(), record_id])?;
    Ok(updated == 1)
}

pub struct Attendance {
    conn: Connection,
}

impl Attendance {
    pub fn new() -> AppResult<Self> {
        let db = Db::new()?;
        Ok(Attendance { conn: db.conn })
    }

    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let db = Db::open(path)?;
        Ok(Attendance { conn: db.conn })
    }

    /// All records of one employee, newest first.
    pub fn for_employee(&self, employee_id: i64) -> AppResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(SELECT_FOR_EMPLOYEE)?;
        let records = stmt
            .query_map([employee_id], AttendanceRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Runs the filtered report over attendance joined with employees.
    pub fn report(&self, filter: &ReportFilter) -> AppResult<Vec<ReportRow>> {
        let query = ReportQuery::build(filter);
        tracing::debug!(sql = query.sql(), params = ?query.params(), "running report query");

        let mut stmt = self.conn.prepare(query.sql())?;
        let rows = stmt
            .query_map(params_from_iter(query.params().iter()), |row| {
                Ok(ReportRow {
                    name: row.get(0)?,
                    department: row.get(1)?,
                    date: row.get(2)?,
                    clock_in: row.get(3)?,
                    clock_out: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
