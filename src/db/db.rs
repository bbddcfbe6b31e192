use crate::db::migrations::{ensure_default_admin, init_with_migrations};
use crate::libs::config::{AdminConfig, Config};
use crate::libs::error::AppResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "attendo.db";

/// SQL function lowercasing text with Unicode case rules; the built-in
/// `LOWER` only folds ASCII letters.
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// An open, migrated and seeded connection to the attendance store.
///
/// Every repository owns one of these for the duration of a single
/// operation; dropping it closes the connection.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database file.
    pub fn new() -> AppResult<Db> {
        let config = Config::read()?;
        Self::open_with(config.database_path()?, &config.admin)
    }

    /// Opens the database at `path`, seeding the built-in default account.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Db> {
        Self::open_with(path, &AdminConfig::default())
    }

    /// Opens the database at `path`, applies pending migrations and makes
    /// sure the `admin` account exists.
    pub fn open_with(path: impl AsRef<Path>, admin: &AdminConfig) -> AppResult<Db> {
        let mut conn = Self::connect(path.as_ref())?;
        init_with_migrations(&mut conn)?;
        ensure_default_admin(&conn, admin)?;

        Ok(Db { conn })
    }

    /// Opens the configured database without touching its schema.
    pub fn new_without_migrations() -> AppResult<Connection> {
        let config = Config::read()?;
        Self::connect(&config.database_path()?)
    }

    pub fn open_without_migrations(path: impl AsRef<Path>) -> AppResult<Connection> {
        Self::connect(path.as_ref())
    }

    fn connect(path: &Path) -> AppResult<Connection> {
        tracing::debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        // Cascading deletes from employees to attendance depend on this.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(&conn)?;
        Ok(conn)
    }
}

fn register_functions(conn: &Connection) -> AppResult<()> {
    conn.create_scalar_function(
        UNICODE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )?;
    Ok(())
}
