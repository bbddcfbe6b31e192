//! Configuration management for the attendo application.
//!
//! Settings live in a pretty-printed `config.json` inside the platform data
//! directory resolved by [`DataStorage`]. A missing file is not an error: the
//! application runs with [`Config::default`] until `attendo init` saves one.
//!
//! ## Configuration Structure
//!
//! - **Database**: optional override of the SQLite file location
//! - **Export**: default report format and output path
//! - **Admin**: credentials of the HR account seeded on first run
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use attendo::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db_path = config.database_path()?;
//! # Ok::<(), attendo::libs::error::AppError>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::error::AppResult;
use crate::libs::export::{ExportFormat, DEFAULT_EXPORT_FILE};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Password, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Default account created by the schema manager when it is missing.
///
/// The password is hashed before it reaches the database; this value is only
/// read when the account row has to be created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Report export defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConfig {
    /// Format used when `report --export` is given without `--format`.
    pub format: ExportFormat,
    /// Fixed output path; overwritten on every export.
    pub output: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            format: ExportFormat::Excel,
            output: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

/// Root configuration object.
///
/// Unset sections fall back to their defaults, so a hand-edited file may
/// contain only the parts a user cares about.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Explicit database file. When absent the database lives next to the
    /// configuration file in the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

impl Config {
    /// Reads the configuration from the platform data directory.
    ///
    /// Returns the defaults when no file has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> AppResult<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the configuration from an explicit file path.
    pub fn read_from(path: &Path) -> AppResult<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration to the platform data directory.
    pub fn save(&self) -> AppResult<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    /// Saves the configuration as pretty-printed JSON, overwriting `path`.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Resolves the database file, honouring the `database` override.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Existing values are offered as defaults. Only the selected modules are
    /// prompted for; the rest keep their current values.
    pub fn init() -> Result<Self> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::init_from(&config_file_path)
    }

    /// Runs the wizard starting from the configuration stored at `path`.
    ///
    /// A file that cannot be parsed is reported before any prompt is shown, so
    /// it is never silently replaced with defaults.
    pub fn init_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_from(path)?;

        let modules = vec![
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            ConfigModule {
                key: "export".to_string(),
                name: "Export".to_string(),
            },
            ConfigModule {
                key: "admin".to_string(),
                name: "Default HR account".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "database" => {
                    msg_print!(Message::ConfigModuleDatabase);
                    let current = config.database_path()?;
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(current.display().to_string())
                        .interact_text()?;
                    config.database = Some(PathBuf::from(path));
                }
                "export" => {
                    msg_print!(Message::ConfigModuleExport);
                    let formats = ExportFormat::all();
                    let current = formats.iter().position(|f| *f == config.export.format).unwrap_or(0);
                    let format = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptExportFormat.to_string())
                        .items(&formats.iter().map(|f| f.to_string()).collect::<Vec<_>>())
                        .default(current)
                        .interact()?;
                    let output: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptExportPath.to_string())
                        .default(config.export.output.display().to_string())
                        .interact_text()?;
                    config.export = ExportConfig {
                        format: formats[format],
                        output: PathBuf::from(output),
                    };
                }
                "admin" => {
                    msg_print!(Message::ConfigModuleAdmin);
                    let username: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptUsername.to_string())
                        .default(config.admin.username.clone())
                        .interact_text()?;
                    let password = Password::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptPassword.to_string())
                        .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordMismatch.to_string())
                        .interact()?;
                    config.admin = AdminConfig { username, password };
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
