//! Command-line interface for attendo.
//!
//! Each subcommand lives in its own module with a clap `Args` struct and a
//! `cmd` function. Commands that manage employees, users or reports require
//! an HR account; clocking in and out is open to everyone.

pub mod clock;
pub mod employee;
pub mod init;
pub mod login;
pub mod migrations;
pub mod report;
pub mod user;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Check credentials and show the commands available to the account")]
    Login(login::LoginArgs),
    #[command(about = "Manage employees (HR only)")]
    Employee(employee::EmployeeArgs),
    #[command(about = "Manage user accounts (HR only)")]
    User(user::UserArgs),
    #[command(about = "Clock an employee in or out")]
    Clock(clock::ClockArgs),
    #[command(about = "Filtered attendance report with optional export (HR only)")]
    Report(report::ReportArgs),
    #[command(about = "Inspect the database schema version")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Login(args) => login::cmd(args),
            Commands::Employee(args) => employee::cmd(args),
            Commands::User(args) => user::cmd(args),
            Commands::Clock(args) => clock::cmd(args),
            Commands::Report(args) => report::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
