#[cfg(test)]
mod tests {
    use attendo::db::attendance::Attendance;
    use attendo::db::employees::{Employee, Employees};
    use attendo::libs::clock::TimeClock;
    use attendo::libs::report::{ReportFilter, ReportRow};
    use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ReportTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    impl TestContext for ReportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("attendo.db");

            let mut employees = Employees::open(&db_path).unwrap();
            employees.add(&Employee::new("Ada Lovelace", "Engineer", "Engineering", "E1")).unwrap();
            employees.add(&Employee::new("Grace Hopper", "Lead", "Platform eng", "E2")).unwrap();
            employees.add(&Employee::new("Joan Clarke", "Analyst", "Finance", "F1")).unwrap();
            employees.add(&Employee::new("Pat 100%_Sure", "", "", "P1")).unwrap();

            let mut clock = TimeClock::open(&db_path).unwrap();
            for (code, month, day) in [("E1", 3, 4), ("E2", 3, 5), ("F1", 3, 5), ("E1", 4, 1), ("F1", 2, 28), ("P1", 3, 6)] {
                clock.clock_in_at(code, at(month, day, 9)).unwrap();
                clock.clock_out_at(code, at(month, day, 17)).unwrap();
            }
            // Still open
            clock.clock_in_at("E2", at(4, 2, 10)).unwrap();

            ReportTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    fn run(ctx: &ReportTestContext, filter: &ReportFilter) -> Vec<ReportRow> {
        Attendance::open(&ctx.db_path).unwrap().report(filter).unwrap()
    }

    fn is_date_descending(rows: &[ReportRow]) -> bool {
        rows.windows(2).all(|pair| pair[0].date >= pair[1].date)
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_empty_filter_returns_everything_newest_first(ctx: &mut ReportTestContext) {
        let rows = run(ctx, &ReportFilter::default());

        assert_eq!(rows.len(), 7);
        assert!(is_date_descending(&rows));
        assert_eq!(rows[0].name, "Grace Hopper");
        assert_eq!(rows[0].clock_out, None);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_department_filter_is_case_insensitive_substring(ctx: &mut ReportTestContext) {
        let rows = run(ctx, &ReportFilter::default().department("Eng"));

        assert_eq!(rows.len(), 4);
        assert!(rows
            .iter()
            .all(|r| r.department.as_deref().unwrap().to_lowercase().contains("eng")));
        assert!(is_date_descending(&rows));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_name_filter(ctx: &mut ReportTestContext) {
        let rows = run(ctx, &ReportFilter::default().name("LOVE"));

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.name == "Ada Lovelace"));
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_like_wildcards_match_literally(ctx: &mut ReportTestContext) {
        let percent = run(ctx, &ReportFilter::default().name("%"));
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].name, "Pat 100%_Sure");

        let underscore = run(ctx, &ReportFilter::default().name("100_"));
        assert!(underscore.is_empty());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_exact_date_filter(ctx: &mut ReportTestContext) {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let rows = run(ctx, &ReportFilter::default().date(day));

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.date == day));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_month_filter_matches_only_that_month(ctx: &mut ReportTestContext) {
        let rows = run(ctx, &ReportFilter::default().month(Month::March));

        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.date.month() == 3));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_filters_are_conjunctive(ctx: &mut ReportTestContext) {
        let filter = ReportFilter::parse(Some("grace"), Some("eng"), None, Some("apr")).unwrap();
        let rows = run(ctx, &filter);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_text_filters_fold_non_ascii_case(ctx: &mut ReportTestContext) {
        Employees::open(&ctx.db_path)
            .unwrap()
            .add(&Employee::new("Élodie Ünal", "Ärztin", "Ärzte", "U1"))
            .unwrap();
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();
        clock.clock_in_at("U1", at(5, 2, 8)).unwrap();

        let by_name = run(ctx, &ReportFilter::default().name("élodie"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Élodie Ünal");

        let by_surname = run(ctx, &ReportFilter::default().name("ÜNAL"));
        assert_eq!(by_surname.len(), 1);

        let by_department = run(ctx, &ReportFilter::default().department("ärzte"));
        assert_eq!(by_department.len(), 1);
        assert_eq!(by_department[0].department.as_deref(), Some("Ärzte"));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_no_match_gives_empty_report(ctx: &mut ReportTestContext) {
        let rows = run(ctx, &ReportFilter::default().department("Legal"));
        assert!(rows.is_empty());
    }
}
