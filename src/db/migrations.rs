//! Database schema migration management and versioning system.
//!
//! The schema manager creates the `employees`, `attendance` and `users`
//! tables, tracks which schema versions have been applied, and seeds the
//! default HR account. All of it is idempotent: opening the same file any
//! number of times leaves one copy of every table, index and seeded row.
//!
//! ## Features
//!
//! - **Version Tracking**: Applied migrations are recorded in `migrations`
//! - **Automatic Application**: Pending migrations run whenever a `Db` is opened
//! - **Transaction Safety**: All pending migrations run in one transaction
//! - **Legacy Import**: Databases written by older tools (plaintext passwords,
//!   no migrations table) are upgraded in place
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attendo::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("attendo.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), attendo::libs::error::AppError>(())
//! ```

use crate::db::users::Role;
use crate::libs::config::AdminConfig;
use crate::libs::error::AppResult;
use crate::libs::messages::Message;
use crate::libs::password::{hash_password, is_hashed};
use crate::{msg_debug, msg_error, msg_info, msg_success};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SELECT_ADMIN_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)";
const INSERT_DEFAULT_ADMIN: &str = "INSERT OR IGNORE INTO users (username, password, role) VALUES (?1, ?2, ?3)";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    /// Unique version number for ordering and tracking
    version: u32,
    /// Human-readable name describing the migration's purpose
    name: &'static str,
    /// Function that applies the schema changes within a transaction
    up: fn(&Transaction) -> AppResult<()>,
}

/// Registry of every migration, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: the three application tables.
        // IF NOT EXISTS keeps databases created before version tracking usable.
        self.add_migration(1, "create_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS employees (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    position TEXT,
                    department TEXT,
                    employee_code TEXT UNIQUE NOT NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS attendance (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    employee_id INTEGER,
                    clock_in_time TIMESTAMP,
                    clock_out_time TIMESTAMP,
                    date TEXT NOT NULL,
                    FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS users (
                    username TEXT PRIMARY KEY,
                    password TEXT NOT NULL,
                    role TEXT NOT NULL CHECK(role IN ('HR', 'Employee'))
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: report lookups and the one-open-record-per-day rule
        self.add_migration(2, "add_attendance_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_attendance_employee ON attendance(employee_id)", [])?;
            tx.execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_open_per_day
                    ON attendance(employee_id, date) WHERE clock_out_time IS NULL",
                [],
            )?;
            Ok(())
        });

        // Version 3: replace plaintext passwords left by older databases
        self.add_migration(3, "hash_legacy_passwords", |tx| {
            let legacy: Vec<(String, String)> = {
                let mut stmt = tx.prepare("SELECT username, password FROM users")?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
                    .collect::<Result<Vec<_>, _>>()?;
                rows.into_iter().filter(|(_, password)| !is_hashed(password)).collect()
            };

            for (username, password) in &legacy {
                tx.execute("UPDATE users SET password = ?1 WHERE username = ?2", params![hash_password(password)?, username])?;
            }

            if !legacy.is_empty() {
                msg_info!(Message::LegacyPasswordsHashed(legacy.len()));
            }
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> AppResult<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded schema version.
    ///
    /// Pending migrations share one transaction, so a failure leaves the
    /// database at its previous version.
    pub fn run_migrations(&self, conn: &mut Connection) -> AppResult<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> AppResult<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .optional()?
            .flatten();

        Ok(version.unwrap_or(0))
    }

    /// Returns `(version, name, applied_at)` for every applied migration.
    pub fn get_migration_history(&self, conn: &Connection) -> AppResult<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings the schema on `conn` up to the latest version.
pub fn init_with_migrations(conn: &mut Connection) -> AppResult<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Returns the schema version recorded in `conn`, or 0 for a fresh file.
pub fn get_db_version(conn: &Connection) -> AppResult<u32> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> AppResult<bool> {
    let manager = MigrationManager::new();
    Ok(get_db_version(conn)? < manager.latest_version())
}

/// Inserts the default HR account unless a user with that name exists.
///
/// Returns `true` when the account was created by this call. The password
/// is only hashed when the row is actually missing.
pub fn ensure_default_admin(conn: &Connection, admin: &AdminConfig) -> AppResult<bool> {
    let exists: bool = conn.query_row(SELECT_ADMIN_EXISTS, [&admin.username], |row| row.get(0))?;
    if exists {
        return Ok(false);
    }

    let hashed = hash_password(&admin.password)?;
    let inserted = conn.execute(INSERT_DEFAULT_ADMIN, params![admin.username, hashed, Role::Hr.as_str()])?;
    if inserted > 0 {
        msg_success!(Message::DefaultAdminSeeded(admin.username.clone()));
    }
    Ok(inserted > 0)
}
