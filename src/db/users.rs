//! Application accounts and credential checks.
//!
//! Users are stored with an argon2 password hash and one of two roles. HR
//! accounts manage employees, users and reports; Employee accounts may only
//! clock in and out.

use crate::db::db::Db;
use crate::libs::error::{AppError, AppResult};
use crate::libs::password::{hash_password, verify_password};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const INSERT_USER: &str = "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)";
const SELECT_CREDENTIALS: &str = "SELECT password, role FROM users WHERE username = ?1";
const SELECT_ALL_USERS: &str = "SELECT username, role FROM users ORDER BY username";

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "HR")]
    Hr,
    Employee,
}

impl Role {
    /// The value stored in the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "HR",
            Role::Employee => "Employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    /// Accepts `HR` or `Employee` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hr" => Ok(Role::Hr),
            "employee" => Ok(Role::Employee),
            other => Err(AppError::InvalidInput(format!("role must be 'HR' or 'Employee', got '{}'", other))),
        }
    }
}

/// An account as listed to HR; the password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub role: Role,
}

pub struct Users {
    conn: Connection,
}

impl Users {
    pub fn new() -> AppResult<Self> {
        let db = Db::new()?;
        Ok(Users { conn: db.conn })
    }

    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let db = Db::open(path)?;
        Ok(Users { conn: db.conn })
    }

    /// Creates an account with a salted password hash.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when a field is blank or `role` is not `HR`/`Employee`
    /// - `DuplicateKey` when the username is taken
    pub fn add(&mut self, username: &str, password: &str, role: &str) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput("username and password are required".to_string()));
        }
        let role: Role = role.parse()?;

        let hashed = hash_password(password)?;
        self.conn
            .execute(INSERT_USER, params![username, hashed, role.as_str()])
            .map_err(|e| AppError::from_insert(e, format!("User '{}'", username)))?;

        tracing::debug!(username, role = %role, "user created");
        Ok(User {
            username: username.to_string(),
            role,
        })
    }

    /// Returns the role of the account when the password matches.
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller: both give `NotFound`.
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<Role> {
        let stored: Option<(String, String)> = self
            .conn
            .query_row(SELECT_CREDENTIALS, [username.trim()], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        match stored {
            Some((hashed, role)) if verify_password(password, &hashed) => role.parse(),
            _ => Err(AppError::NotFound("User with these credentials".to_string())),
        }
    }

    pub fn list(&self) -> AppResult<Vec<User>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_USERS)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(username, role)| -> AppResult<User> { Ok(User { username, role: role.parse()? }) })
            .collect()
    }
}
