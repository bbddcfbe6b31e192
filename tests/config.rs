#[cfg(test)]
mod tests {
    use attendo::libs::config::{AdminConfig, Config, ExportConfig, CONFIG_FILE_NAME};
    use attendo::libs::error::AppError;
    use attendo::libs::export::{ExportFormat, DEFAULT_EXPORT_FILE};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Each test gets its own storage directory for `config.json`.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.is_none());
        assert_eq!(config.export.format, ExportFormat::Excel);
        assert_eq!(config.export.output, PathBuf::from(DEFAULT_EXPORT_FILE));
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "admin123");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            database: Some(PathBuf::from("/srv/attendo/attendo.db")),
            export: ExportConfig {
                format: ExportFormat::Csv,
                output: PathBuf::from("reports/attendance.csv"),
            },
            admin: AdminConfig {
                username: "hr".to_string(),
                password: "s3cret".to_string(),
            },
        };
        config.save_to(&ctx.config_path).unwrap();

        let read_config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(read_config, config);
        assert_eq!(read_config.database_path().unwrap(), PathBuf::from("/srv/attendo/attendo.db"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_uses_defaults(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.config_path, r#"{ "export": { "format": "json", "output": "out.json" } }"#).unwrap();

        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config.export.format, ExportFormat::Json);
        assert_eq!(config.admin, AdminConfig::default());
        assert!(config.database.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_config_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.config_path, "{ not json").unwrap();

        assert!(matches!(Config::read_from(&ctx.config_path), Err(AppError::Config(_))));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_wizard_refuses_malformed_config(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.config_path, "{ not json").unwrap();

        let err = Config::init_from(&ctx.config_path).unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Config(_))));
        assert_eq!(fs::read_to_string(&ctx.config_path).unwrap(), "{ not json");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_export_format_is_stored_lowercase(ctx: &mut ConfigTestContext) {
        Config::default().save_to(&ctx.config_path).unwrap();

        let raw = fs::read_to_string(&ctx.config_path).unwrap();
        assert!(raw.contains(r#""format": "excel""#));
        assert!(!raw.contains("database"));
    }
}
