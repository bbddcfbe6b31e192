#[cfg(test)]
mod tests {
    use attendo::db::attendance::Attendance;
    use attendo::db::employees::{Employee, Employees};
    use attendo::libs::clock::{DayStatus, TimeClock};
    use attendo::libs::error::AppError;
    use chrono::{NaiveDate, NaiveDateTime, Timelike};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ClockTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        employee_id: i64,
    }

    impl TestContext for ClockTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("attendo.db");
            let employee_id = Employees::open(&db_path)
                .unwrap()
                .add(&Employee::new("Ada Lovelace", "Engineer", "Engineering", "E1"))
                .unwrap();
            ClockTestContext {
                _temp_dir: temp_dir,
                db_path,
                employee_id,
            }
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_clock_in_then_out_closes_one_record(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        let opened = clock.clock_in_at("E1", at(4, 9, 0)).unwrap();
        assert!(opened.is_open());
        let closed = clock.clock_out_at("E1", at(4, 17, 30)).unwrap();
        assert_eq!(closed.id, opened.id);

        let records = Attendance::open(&ctx.db_path).unwrap().for_employee(ctx.employee_id).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].clock_in, at(4, 9, 0));
        assert_eq!(records[0].clock_out, Some(at(4, 17, 30)));
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_second_clock_in_same_day_is_already_open(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        clock.clock_in_at("E1", at(4, 9, 0)).unwrap();
        let again = clock.clock_in_at("E1", at(4, 9, 5));

        assert!(matches!(again, Err(AppError::AlreadyOpen { .. })));
        let records = Attendance::open(&ctx.db_path).unwrap().for_employee(ctx.employee_id).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_clock_out_without_clock_in(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        let result = clock.clock_out_at("E1", at(4, 17, 0));
        assert!(matches!(result, Err(AppError::NoOpenRecord { .. })));
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_open_record_from_another_day_does_not_count(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        clock.clock_in_at("E1", at(4, 9, 0)).unwrap();

        assert!(matches!(clock.clock_out_at("E1", at(5, 17, 0)), Err(AppError::NoOpenRecord { .. })));
        clock.clock_in_at("E1", at(5, 9, 0)).unwrap();
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_full_day_scenario(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        clock.clock_in_at("E1", at(6, 8, 55)).unwrap();
        assert!(matches!(clock.clock_in_at("E1", at(6, 9, 0)), Err(AppError::AlreadyOpen { .. })));
        clock.clock_out_at("E1", at(6, 17, 0)).unwrap();
        assert!(matches!(clock.clock_out_at("E1", at(6, 17, 1)), Err(AppError::NoOpenRecord { .. })));

        let records = Attendance::open(&ctx.db_path).unwrap().for_employee(ctx.employee_id).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].clock_out, Some(at(6, 17, 0)));
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_closed_record_is_never_rewritten(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        let first = clock.clock_in_at("E1", at(7, 9, 0)).unwrap();
        clock.clock_out_at("E1", at(7, 12, 0)).unwrap();
        let second = clock.clock_in_at("E1", at(7, 13, 0)).unwrap();
        assert_ne!(first.id, second.id);
        clock.clock_out_at("E1", at(7, 18, 0)).unwrap();

        let records = Attendance::open(&ctx.db_path).unwrap().for_employee(ctx.employee_id).unwrap();
        let morning = records.iter().find(|r| r.id == first.id).unwrap();
        assert_eq!(morning.clock_in, at(7, 9, 0));
        assert_eq!(morning.clock_out, Some(at(7, 12, 0)));
        assert_eq!(records.len(), 2);
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_day_status_follows_the_state_machine(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();

        assert_eq!(clock.day_status("E1", day).unwrap(), DayStatus::NoRecord);

        clock.clock_in_at("E1", at(8, 9, 0)).unwrap();
        assert!(matches!(clock.day_status("E1", day).unwrap(), DayStatus::Open(r) if r.clock_in == at(8, 9, 0)));

        clock.clock_out_at("E1", at(8, 17, 0)).unwrap();
        assert!(matches!(clock.day_status("E1", day).unwrap(), DayStatus::Closed(r) if r.clock_out == Some(at(8, 17, 0))));
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_unknown_and_blank_codes(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        assert!(matches!(clock.clock_in_at("nobody", at(4, 9, 0)), Err(AppError::NotFound(_))));
        assert!(matches!(clock.clock_out_at("nobody", at(4, 9, 0)), Err(AppError::NotFound(_))));
        assert!(matches!(clock.clock_in_at("  ", at(4, 9, 0)), Err(AppError::InvalidInput(_))));
    }

    #[test_context(ClockTestContext)]
    #[test]
    fn test_clock_in_now_truncates_to_whole_seconds(ctx: &mut ClockTestContext) {
        let mut clock = TimeClock::open(&ctx.db_path).unwrap();

        let record = clock.clock_in("E1").unwrap();
        assert_eq!(record.clock_in.nanosecond(), 0);

        let stored = Attendance::open(&ctx.db_path).unwrap().for_employee(ctx.employee_id).unwrap();
        assert_eq!(stored[0].clock_in, record.clock_in);
    }
}
