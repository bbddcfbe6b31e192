/// Every piece of user-facing text the application prints.
///
/// The wording lives in `display.rs`; call sites only pick a variant and
/// supply its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === EMPLOYEE MESSAGES ===
    EmployeeAdded(String, i64), // code, id
    EmployeeDeleted(String),    // code
    EmployeesHeader,
    NoEmployees,
    ConfirmDeleteEmployee(String), // code

    // === USER MESSAGES ===
    UserCreated(String, String), // username, role
    UsersHeader,

    // === AUTHENTICATION MESSAGES ===
    LoginSucceeded(String, String), // username, role
    AvailableCommands(String),
    InvalidCredentials,
    HrRoleRequired,

    // === CLOCK MESSAGES ===
    ClockedIn(String, String),  // code, time
    ClockedOut(String, String), // code, time
    StatusNoRecord(String, String), // code, date
    StatusOpen(String, String),     // code, clock-in time
    StatusClosed(String, String, String), // code, clock-in, clock-out

    // === REPORT MESSAGES ===
    ReportHeader(usize), // row count
    NoRecordsFound,
    ExportCompleted(String), // path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleDatabase,
    ConfigModuleExport,
    ConfigModuleAdmin,

    // === PROMPTS ===
    PromptSelectModules,
    PromptDatabasePath,
    PromptExportFormat,
    PromptExportPath,
    PromptUsername,
    PromptPassword,
    PromptPasswordConfirm,
    PasswordMismatch,
    PromptEmployeeName,
    PromptEmployeePosition,
    PromptEmployeeDepartment,
    PromptEmployeeCode,
    PromptRole,

    // === GENERAL MESSAGES ===
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    DefaultAdminSeeded(String), // username
    LegacyPasswordsHashed(usize),
}
