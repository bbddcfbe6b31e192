//! Employee registry.
//!
//! Employees are identified by a unique, human-assigned `employee_code`; the
//! numeric id is only used to link attendance rows. Deleting an employee
//! cascades to all of their attendance records.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attendo::db::employees::{Employee, Employees};
//!
//! let mut employees = Employees::new()?;
//! let id = employees.add(&Employee::new("Ada Lovelace", "Engineer", "Engineering", "E1"))?;
//! employees.delete_by_code("E1")?;
//! # Ok::<(), attendo::libs::error::AppError>(())
//! ```

use crate::db::db::Db;
use crate::libs::error::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::path::Path;

const INSERT_EMPLOYEE: &str = "INSERT INTO employees (name, position, department, employee_code) VALUES (?1, ?2, ?3, ?4)";
const SELECT_BY_CODE: &str = "SELECT id, name, position, department, employee_code FROM employees WHERE employee_code = ?1";
const SELECT_ID_BY_CODE: &str = "SELECT id FROM employees WHERE employee_code = ?1";
const SELECT_ALL_EMPLOYEES: &str = "SELECT id, name, position, department, employee_code FROM employees ORDER BY name COLLATE NOCASE, employee_code";
const DELETE_EMPLOYEE: &str = "DELETE FROM employees WHERE id = ?1";

/// A registered employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Assigned by the store on insert
    pub id: Option<i64>,
    pub name: String,
    pub position: Option<String>,
    pub department: Option<String>,
    /// Unique code used for clocking in and out
    pub code: String,
}

impl Employee {
    /// Builds an unsaved employee from form input.
    ///
    /// Surrounding whitespace is dropped and empty optional fields become
    /// `None`.
    pub fn new(name: &str, position: &str, department: &str, code: &str) -> Self {
        Employee {
            id: None,
            name: name.trim().to_string(),
            position: non_empty(position),
            department: non_empty(department),
            code: code.trim().to_string(),
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
            position: row.get(2)?,
            department: row.get(3)?,
            code: row.get(4)?,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Looks up the surrogate id for an employee code on any connection,
/// including an open transaction.
pub(crate) fn find_id_by_code(conn: &Connection, code: &str) -> AppResult<Option<i64>> {
    Ok(conn.query_row(SELECT_ID_BY_CODE, [code], |row| row.get(0)).optional()?)
}

pub struct Employees {
    conn: Connection,
}

impl Employees {
    pub fn new() -> AppResult<Self> {
        let db = Db::new()?;
        Ok(Employees { conn: db.conn })
    }

    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let db = Db::open(path)?;
        Ok(Employees { conn: db.conn })
    }

    /// Registers an employee and returns the new id.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the name or code is blank
    /// - `DuplicateKey` when the code is already registered
    pub fn add(&mut self, employee: &Employee) -> AppResult<i64> {
        if employee.name.trim().is_empty() || employee.code.trim().is_empty() {
            return Err(AppError::InvalidInput("name and employee code are required".to_string()));
        }

        self.conn
            .execute(
                INSERT_EMPLOYEE,
                params![employee.name, employee.position, employee.department, employee.code],
            )
            .map_err(|e| AppError::from_insert(e, format!("Employee code '{}'", employee.code)))?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, code = %employee.code, "employee registered");
        Ok(id)
    }

    pub fn find_by_code(&self, code: &str) -> AppResult<Option<Employee>> {
        Ok(self.conn.query_row(SELECT_BY_CODE, [code.trim()], Employee::from_row).optional()?)
    }

    /// Deletes an employee together with their attendance history.
    pub fn delete_by_code(&mut self, code: &str) -> AppResult<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::InvalidInput("employee code is required".to_string()));
        }

        let tx = self.conn.transaction()?;
        let id = find_id_by_code(&tx, code)?.ok_or_else(|| AppError::NotFound(format!("Employee '{}'", code)))?;
        tx.execute(DELETE_EMPLOYEE, [id])?;
        tx.commit()?;

        tracing::debug!(id, code, "employee deleted");
        Ok(())
    }

    pub fn list(&self) -> AppResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_EMPLOYEES)?;
        let employees = stmt.query_map([], Employee::from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }
}
