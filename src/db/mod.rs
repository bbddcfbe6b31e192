//! Database layer for the attendo application.
//!
//! A single SQLite file holds three tables: `employees`, `attendance` and
//! `users`. Every repository opens its own [`db::Db`], which applies pending
//! migrations and seeds the default HR account before handing out the
//! connection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attendo::db::employees::{Employee, Employees};
//! use attendo::db::users::Users;
//!
//! let mut employees = Employees::new()?;
//! employees.add(&Employee::new("Grace Hopper", "Admiral", "Navy", "G1"))?;
//! let role = Users::new()?.authenticate("admin", "admin123")?;
//! # Ok::<(), attendo::libs::error::AppError>(())
//! ```

/// Connection setup, migration and seeding.
pub mod db;

/// Versioned schema changes and the default account.
pub mod migrations;

/// Clock-in/clock-out records and the report query.
pub mod attendance;

/// Employee registry keyed by employee code.
pub mod employees;

/// Accounts, roles and credential checks.
pub mod users;
