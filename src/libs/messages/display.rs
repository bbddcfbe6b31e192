//! Display implementation for attendo application messages.
//!
//! All user-facing text is defined here, in one match, so wording stays
//! consistent across commands and parameters are interpolated with their
//! proper types.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === EMPLOYEE MESSAGES ===
            Message::EmployeeAdded(code, id) => format!("Employee '{}' added successfully (id {}).", code, id),
            Message::EmployeeDeleted(code) => format!("Employee '{}' deleted successfully.", code),
            Message::EmployeesHeader => "Employees:".to_string(),
            Message::NoEmployees => "No employees registered yet.".to_string(),
            Message::ConfirmDeleteEmployee(code) => format!("Delete employee '{}' and all of their attendance records?", code),

            // === USER MESSAGES ===
            Message::UserCreated(username, role) => format!("User '{}' created with role {}.", username, role),
            Message::UsersHeader => "Users:".to_string(),

            // === AUTHENTICATION MESSAGES ===
            Message::LoginSucceeded(username, role) => format!("Logged in as '{}' ({}).", username, role),
            Message::AvailableCommands(commands) => format!("Available commands: {}", commands),
            Message::InvalidCredentials => "Invalid username or password.".to_string(),
            Message::HrRoleRequired => "This command requires an HR account.".to_string(),

            // === CLOCK MESSAGES ===
            Message::ClockedIn(code, time) => format!("Employee '{}' clocked in at {}", code, time),
            Message::ClockedOut(code, time) => format!("Employee '{}' clocked out at {}", code, time),
            Message::StatusNoRecord(code, date) => format!("Employee '{}' has not clocked in on {}.", code, date),
            Message::StatusOpen(code, since) => format!("Employee '{}' is clocked in since {}.", code, since),
            Message::StatusClosed(code, clock_in, clock_out) => {
                format!("Employee '{}' clocked in at {} and out at {}.", code, clock_in, clock_out)
            }

            // === REPORT MESSAGES ===
            Message::ReportHeader(count) => format!("Attendance report ({} record(s))", count),
            Message::NoRecordsFound => "No attendance records match the given filters.".to_string(),
            Message::ExportCompleted(path) => format!("Report exported successfully to: {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleExport => "Export settings".to_string(),
            Message::ConfigModuleAdmin => "Default HR account".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptDatabasePath => "Database file".to_string(),
            Message::PromptExportFormat => "Default export format".to_string(),
            Message::PromptExportPath => "Export file path".to_string(),
            Message::PromptUsername => "Username".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),
            Message::PromptEmployeeName => "Name".to_string(),
            Message::PromptEmployeePosition => "Position".to_string(),
            Message::PromptEmployeeDepartment => "Department".to_string(),
            Message::PromptEmployeeCode => "Employee code".to_string(),
            Message::PromptRole => "Role".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::DefaultAdminSeeded(username) => format!("Default HR account '{}' created", username),
            Message::LegacyPasswordsHashed(count) => format!("Hashed {} stored plaintext password(s)", count),
        };
        write!(f, "{}", text)
    }
}
