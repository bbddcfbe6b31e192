use super::login::AuthArgs;
use crate::{
    db::attendance::Attendance,
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
        report::ReportFilter,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    auth: AuthArgs,

    /// Part of the employee name, any case
    #[arg(short, long)]
    name: Option<String>,

    /// Part of the department, any case
    #[arg(short, long)]
    department: Option<String>,

    /// Exact day (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// Month name, matched in every year
    #[arg(short, long)]
    month: Option<String>,

    /// Write the rows to a file as well
    #[arg(short, long)]
    export: bool,

    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    args.auth.require_hr()?;

    let filter = ReportFilter::parse(
        args.name.as_deref(),
        args.department.as_deref(),
        args.date.as_deref(),
        args.month.as_deref(),
    )?;
    let rows = Attendance::new()?.report(&filter)?;

    if rows.is_empty() {
        msg_info!(Message::NoRecordsFound);
    } else {
        msg_print!(Message::ReportHeader(rows.len()), true);
        View::report(&rows);
    }

    if args.export {
        let config = Config::read()?;
        let format = args.format.unwrap_or(config.export.format);
        let output = args.output.unwrap_or_else(|| config.export.output.with_extension(format.extension()));

        let path = Exporter::new(format, Some(output)).export(&rows)?;
        msg_success!(Message::ExportCompleted(path.display().to_string()));
    }

    Ok(())
}
