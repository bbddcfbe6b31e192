//! Core library modules for the attendo application.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging, errors
//! - **Attendance Rules**: The clock-in/clock-out state machine
//! - **Reporting**: Filtered report queries, export and console tables
//! - **Credentials**: Salted password hashing
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attendo::libs::clock::TimeClock;
//!
//! let mut clock = TimeClock::new()?;
//! let record = clock.clock_in("E1")?;
//! # Ok::<(), attendo::libs::error::AppError>(())
//! ```

pub mod clock;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod messages;
pub mod password;
pub mod report;
pub mod view;
