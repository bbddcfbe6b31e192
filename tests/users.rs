#[cfg(test)]
mod tests {
    use attendo::db::users::{Role, Users};
    use attendo::libs::error::AppError;
    use attendo::libs::password::is_hashed;
    use rusqlite::Connection;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct UserTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for UserTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("attendo.db");
            UserTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    fn stored_password(db_path: &Path, username: &str) -> String {
        let conn = Connection::open(db_path).unwrap();
        conn.query_row("SELECT password FROM users WHERE username = ?1", [username], |row| row.get(0))
            .unwrap()
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_default_admin_authenticates(ctx: &mut UserTestContext) {
        let users = Users::open(&ctx.db_path).unwrap();

        assert_eq!(users.authenticate("admin", "admin123").unwrap(), Role::Hr);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_add_user_and_authenticate(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();

        let user = users.add("clerk", "s3cret", "Employee").unwrap();
        assert_eq!(user.role, Role::Employee);

        assert_eq!(users.authenticate("clerk", "s3cret").unwrap(), Role::Employee);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_wrong_password_and_unknown_user_look_the_same(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();
        users.add("clerk", "s3cret", "Employee").unwrap();

        assert!(matches!(users.authenticate("clerk", "wrong"), Err(AppError::NotFound(_))));
        assert!(matches!(users.authenticate("nobody", "s3cret"), Err(AppError::NotFound(_))));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_passwords_are_never_stored_in_plaintext(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();
        users.add("hr2", "hunter2", "HR").unwrap();

        for username in ["admin", "hr2"] {
            let stored = stored_password(&ctx.db_path, username);
            assert!(is_hashed(&stored), "{username} has a plaintext password");
            assert_ne!(stored, "hunter2");
            assert_ne!(stored, "admin123");
        }
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_same_password_gets_distinct_salts(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();
        users.add("a", "same", "Employee").unwrap();
        users.add("b", "same", "Employee").unwrap();

        assert_ne!(stored_password(&ctx.db_path, "a"), stored_password(&ctx.db_path, "b"));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_role_is_parsed_case_insensitively(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();

        assert_eq!(users.add("one", "pw", "hr").unwrap().role, Role::Hr);
        assert_eq!(users.add("two", "pw", "EMPLOYEE").unwrap().role, Role::Employee);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_invalid_role_and_blank_fields(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();

        assert!(matches!(users.add("x", "pw", "Manager"), Err(AppError::InvalidInput(_))));
        assert!(matches!(users.add("", "pw", "HR"), Err(AppError::InvalidInput(_))));
        assert!(matches!(users.add("x", "", "HR"), Err(AppError::InvalidInput(_))));
        assert!(matches!(users.add("x", "pw", ""), Err(AppError::InvalidInput(_))));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_duplicate_username(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();

        assert!(matches!(users.add("admin", "other", "HR"), Err(AppError::DuplicateKey(_))));
        assert_eq!(users.authenticate("admin", "admin123").unwrap(), Role::Hr);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_list_hides_passwords(ctx: &mut UserTestContext) {
        let mut users = Users::open(&ctx.db_path).unwrap();
        users.add("zed", "pw", "Employee").unwrap();

        let listed: Vec<(String, Role)> = users.list().unwrap().into_iter().map(|u| (u.username, u.role)).collect();
        assert_eq!(listed, vec![("admin".to_string(), Role::Hr), ("zed".to_string(), Role::Employee)]);
    }
}
