use crate::db::attendance::TIMESTAMP_FORMAT;
use crate::db::employees::Employee;
use crate::db::users::User;
use crate::libs::export::REPORT_COLUMNS;
use crate::libs::report::ReportRow;
use prettytable::{row, Row, Table};

/// Terminal tables for command output.
pub struct View {}

impl View {
    pub fn employees(employees: &[Employee]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "CODE", "NAME", "POSITION", "DEPARTMENT"]);
        for employee in employees {
            table.add_row(row![
                employee.id.unwrap_or(0),
                employee.code,
                employee.name,
                employee.position.as_deref().unwrap_or("-"),
                employee.department.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();
    }

    pub fn users(users: &[User]) {
        let mut table = Table::new();

        table.add_row(row!["USERNAME", "ROLE"]);
        for user in users {
            table.add_row(row![user.username, user.role]);
        }
        table.printstd();
    }

    /// Report rows; an open session shows `-` as clock-out.
    pub fn report(rows: &[ReportRow]) {
        let mut table = Table::new();

        table.add_row(Row::from(REPORT_COLUMNS.iter().map(|c| c.to_uppercase()).collect::<Vec<_>>()));
        for report_row in rows {
            table.add_row(row![
                report_row.name,
                report_row.department.as_deref().unwrap_or("-"),
                report_row.date,
                report_row.clock_in.format(TIMESTAMP_FORMAT),
                report_row
                    .clock_out
                    .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string())
            ]);
        }
        table.printstd();
    }
}
