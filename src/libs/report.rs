//! Filtered attendance reports.
//!
//! A [`ReportFilter`] holds up to four optional criteria. [`ReportQuery`]
//! turns them into one parameterized statement over `attendance` joined with
//! `employees`: every criterion maps to a fixed SQL fragment, user text only
//! ever travels as a bound parameter, and absent criteria add nothing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attendo::db::attendance::Attendance;
//! use attendo::libs::report::ReportFilter;
//!
//! let filter = ReportFilter::parse(None, Some("eng"), None, Some("march"))?;
//! let rows = Attendance::new()?.report(&filter)?;
//! # Ok::<(), attendo::libs::error::AppError>(())
//! ```

use crate::db::attendance::DATE_FORMAT;
use crate::libs::error::{AppError, AppResult};
use chrono::{Month, NaiveDate, NaiveDateTime};
use serde::Serialize;

const BASE_QUERY: &str = "SELECT e.name, e.department, a.date, a.clock_in_time, a.clock_out_time
    FROM attendance a
    JOIN employees e ON a.employee_id = e.id
    WHERE 1=1";
// `unicode_lower` is registered on every connection by `Db`.
const NAME_CLAUSE: &str = " AND unicode_lower(e.name) LIKE unicode_lower(?) ESCAPE '\\'";
const DEPARTMENT_CLAUSE: &str = " AND unicode_lower(e.department) LIKE unicode_lower(?) ESCAPE '\\'";
const DATE_CLAUSE: &str = " AND a.date = ?";
const MONTH_CLAUSE: &str = " AND strftime('%m', a.date) = ?";
const ORDER_CLAUSE: &str = " ORDER BY a.date DESC, a.clock_in_time DESC";

/// Criteria of an attendance report. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Case-insensitive substring of the employee name
    pub name: Option<String>,
    /// Case-insensitive substring of the department
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
    /// Calendar month, matched in every year
    pub month: Option<Month>,
}

impl ReportFilter {
    /// Builds a filter from raw user input.
    ///
    /// Blank values are treated as absent. The date must be `YYYY-MM-DD`;
    /// the month is an English month name, full or abbreviated, in any case.
    pub fn parse(name: Option<&str>, department: Option<&str>, date: Option<&str>, month: Option<&str>) -> AppResult<Self> {
        let date = match non_blank(date) {
            Some(value) => Some(parse_date(&value)?),
            None => None,
        };
        let month = match non_blank(month) {
            Some(value) => Some(parse_month(&value)?),
            None => None,
        };

        Ok(ReportFilter {
            name: non_blank(name),
            department: non_blank(department),
            date,
            month,
        })
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::InvalidInput(format!("date must be YYYY-MM-DD, got '{}'", value.trim())))
}

/// Parses an English month name such as `March`, `mar` or `MARCH`.
pub fn parse_month(value: &str) -> AppResult<Month> {
    value
        .trim()
        .parse::<Month>()
        .map_err(|_| AppError::InvalidInput(format!("unknown month '{}'", value.trim())))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// One line of an attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub department: Option<String>,
    pub date: NaiveDate,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
}

/// A composed report statement and its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    sql: String,
    params: Vec<String>,
}

impl ReportQuery {
    pub fn build(filter: &ReportFilter) -> Self {
        let mut sql = String::from(BASE_QUERY);
        let mut params = Vec::new();

        if let Some(name) = &filter.name {
            sql.push_str(NAME_CLAUSE);
            params.push(contains_pattern(name));
        }
        if let Some(department) = &filter.department {
            sql.push_str(DEPARTMENT_CLAUSE);
            params.push(contains_pattern(department));
        }
        if let Some(date) = filter.date {
            sql.push_str(DATE_CLAUSE);
            params.push(date.format(DATE_FORMAT).to_string());
        }
        if let Some(month) = filter.month {
            sql.push_str(MONTH_CLAUSE);
            params.push(format!("{:02}", month.number_from_month()));
        }

        sql.push_str(ORDER_CLAUSE);
        ReportQuery { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

// `%`, `_` and `\` in user text must match literally.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_adds_no_predicates() {
        let query = ReportQuery::build(&ReportFilter::default());
        assert!(query.params().is_empty());
        assert!(!query.sql().contains("LIKE"));
        assert!(query.sql().ends_with(ORDER_CLAUSE));
    }

    #[test]
    fn filters_compose_in_fixed_order() {
        let filter = ReportFilter::default()
            .name("ada")
            .department("Eng")
            .date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .month(Month::March);
        let query = ReportQuery::build(&filter);

        assert_eq!(query.params(), ["%ada%", "%Eng%", "2024-03-05", "03"]);
        assert_eq!(query.sql().matches('?').count(), 4);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[test]
    fn parse_treats_blank_as_absent() {
        let filter = ReportFilter::parse(Some("  "), Some(""), None, Some(" ")).unwrap();
        assert_eq!(filter, ReportFilter::default());
    }

    #[test]
    fn parse_accepts_month_names_in_any_case() {
        assert_eq!(parse_month("march").unwrap(), Month::March);
        assert_eq!(parse_month("DEC").unwrap(), Month::December);
        assert!(matches!(parse_month("Smarch"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn parse_rejects_malformed_date() {
        let result = ReportFilter::parse(None, None, Some("05/03/2024"), None);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
