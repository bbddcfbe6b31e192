//! Serialization of report rows to a file.
//!
//! The exporter writes rows that were already fetched; it never queries the
//! store. Whatever exists at the output path is overwritten.
//!
//! ## Formats
//!
//! - **Excel**: one worksheet, bold gray header row, auto-sized columns
//! - **CSV**: header line followed by one record per row
//! - **JSON**: pretty-printed array of objects keyed by column
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attendo::db::attendance::Attendance;
//! use attendo::libs::export::{ExportFormat, Exporter};
//! use attendo::libs::report::ReportFilter;
//!
//! let rows = Attendance::new()?.report(&ReportFilter::default())?;
//! let path = Exporter::new(ExportFormat::Excel, None).export(&rows)?;
//! # Ok::<(), attendo::libs::error::AppError>(())
//! ```

use crate::db::attendance::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::libs::error::{AppError, AppResult};
use crate::libs::report::ReportRow;
use rust_xlsxwriter::{Color, Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output path used when neither configuration nor the caller names one.
pub const DEFAULT_EXPORT_FILE: &str = "attendance_report.xlsx";

/// Column headers, in output order.
pub const REPORT_COLUMNS: [&str; 5] = ["Name", "Department", "Date", "Clock In", "Clock Out"];

/// Supported export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook (`.xlsx`)
    Excel,
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl ExportFormat {
    pub fn all() -> [ExportFormat; 3] {
        [ExportFormat::Excel, ExportFormat::Csv, ExportFormat::Json]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// A report row as text cells, the shape shared by every format.
#[derive(Debug, Serialize)]
struct ExportRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Clock In")]
    clock_in: String,
    #[serde(rename = "Clock Out")]
    clock_out: String,
}

impl From<&ReportRow> for ExportRow {
    fn from(row: &ReportRow) -> Self {
        ExportRow {
            name: row.name.clone(),
            department: row.department.clone().unwrap_or_default(),
            date: row.date.format(DATE_FORMAT).to_string(),
            clock_in: row.clock_in.format(TIMESTAMP_FORMAT).to_string(),
            clock_out: row.clock_out.map(|t| t.format(TIMESTAMP_FORMAT).to_string()).unwrap_or_default(),
        }
    }
}

impl ExportRow {
    fn cells(&self) -> [&str; 5] {
        [&self.name, &self.department, &self.date, &self.clock_in, &self.clock_out]
    }
}

/// Writes report rows in one format to one path.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter. Without an explicit path the file is
    /// `attendance_report` with the format's extension in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| Path::new(DEFAULT_EXPORT_FILE).with_extension(format.extension()));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `rows` and returns the path written.
    ///
    /// # Errors
    ///
    /// Every I/O or serialization failure is reported as `ExportFailure`.
    pub fn export(&self, rows: &[ReportRow]) -> AppResult<PathBuf> {
        let rows: Vec<ExportRow> = rows.iter().map(ExportRow::from).collect();

        self.prepare_parent().map_err(export_failure)?;
        match self.format {
            ExportFormat::Excel => self.export_excel(&rows)?,
            ExportFormat::Csv => self.export_csv(&rows)?,
            ExportFormat::Json => self.export_json(&rows)?,
        }

        tracing::debug!(path = %self.output_path.display(), format = %self.format, rows = rows.len(), "report exported");
        Ok(self.output_path.clone())
    }

    fn prepare_parent(&self) -> std::io::Result<()> {
        match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn export_excel(&self, rows: &[ExportRow]) -> AppResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold().set_background_color(Color::Gray);

        for (col, header) in REPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let excel_row = index as u32 + 1;
            for (col, cell) in row.cells().iter().enumerate() {
                worksheet.write_string(excel_row, col as u16, *cell)?;
            }
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn export_csv(&self, rows: &[ExportRow]) -> AppResult<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(REPORT_COLUMNS)?;
        for row in rows {
            wtr.write_record(row.cells())?;
        }

        wtr.flush().map_err(export_failure)?;
        Ok(())
    }

    fn export_json(&self, rows: &[ExportRow]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(rows).map_err(export_failure)?;
        File::create(&self.output_path)
            .and_then(|mut file| file.write_all(json.as_bytes()))
            .map_err(export_failure)?;
        Ok(())
    }
}

fn export_failure(err: impl fmt::Display) -> AppError {
    AppError::ExportFailure(err.to_string())
}
