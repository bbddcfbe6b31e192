use super::login::AuthArgs;
use crate::{
    db::attendance::{DATE_FORMAT, TIMESTAMP_FORMAT},
    libs::{
        clock::{DayStatus, TimeClock},
        messages::Message,
        report::parse_date,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ClockArgs {
    #[command(flatten)]
    auth: AuthArgs,

    #[command(subcommand)]
    command: ClockCommand,
}

#[derive(Debug, Subcommand)]
enum ClockCommand {
    /// Start today's session for an employee
    In { code: String },
    /// Finish today's open session for an employee
    Out { code: String },
    /// Show where an employee stands on a day
    Status {
        code: String,
        /// Day to inspect (YYYY-MM-DD), today by default
        #[arg(short, long)]
        date: Option<String>,
    },
}

pub fn cmd(args: ClockArgs) -> Result<()> {
    // Both roles may clock; an account is still required.
    let (username, role) = args.auth.authenticate()?;
    tracing::debug!(username = %username, role = %role, "clock access granted");

    match args.command {
        ClockCommand::In { code } => {
            let record = TimeClock::new()?.clock_in(&code)?;
            msg_success!(Message::ClockedIn(code, record.clock_in.format(TIMESTAMP_FORMAT).to_string()));
        }
        ClockCommand::Out { code } => {
            let record = TimeClock::new()?.clock_out(&code)?;
            let clock_out = record.clock_out.unwrap_or(record.clock_in);
            msg_success!(Message::ClockedOut(code, clock_out.format(TIMESTAMP_FORMAT).to_string()));
        }
        ClockCommand::Status { code, date } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };

            match TimeClock::new()?.day_status(&code, date)? {
                DayStatus::NoRecord => msg_info!(Message::StatusNoRecord(code, date.format(DATE_FORMAT).to_string())),
                DayStatus::Open(record) => msg_info!(Message::StatusOpen(code, record.clock_in.format(TIMESTAMP_FORMAT).to_string())),
                DayStatus::Closed(record) => msg_info!(Message::StatusClosed(
                    code,
                    record.clock_in.format(TIMESTAMP_FORMAT).to_string(),
                    record.clock_out.map(|t| t.format(TIMESTAMP_FORMAT).to_string()).unwrap_or_default()
                )),
            }
        }
    }

    Ok(())
}
