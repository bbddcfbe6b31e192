//! # Attendo - employee attendance register
//!
//! A command-line tool that records employee clock-in/clock-out events in a
//! local SQLite file and produces filtered attendance reports.
//!
//! ## Features
//!
//! - **Employee Registry**: Register and delete employees by unique code
//! - **Attendance Rules**: At most one open clock-in per employee per day
//! - **Accounts**: HR and Employee roles with salted password hashes
//! - **Reports**: Filter by name, department, date or month
//! - **Data Export**: Excel, CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attendo::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
