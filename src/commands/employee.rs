use super::login::AuthArgs;
use crate::{
    db::employees::{Employee, Employees},
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(flatten)]
    auth: AuthArgs,

    #[command(subcommand)]
    command: EmployeeCommand,
}

#[derive(Debug, Subcommand)]
enum EmployeeCommand {
    /// Register an employee; missing fields are prompted for
    Add {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        position: Option<String>,
        #[arg(short, long)]
        department: Option<String>,
        #[arg(short, long)]
        code: Option<String>,
    },
    /// Delete an employee and their attendance records
    Delete {
        code: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    List,
}

pub fn cmd(args: EmployeeArgs) -> Result<()> {
    args.auth.require_hr()?;

    match args.command {
        EmployeeCommand::Add {
            name,
            position,
            department,
            code,
        } => handle_add(name, position, department, code),
        EmployeeCommand::Delete { code, yes } => handle_delete(code, yes),
        EmployeeCommand::List => handle_list(),
    }
}

fn handle_add(name: Option<String>, position: Option<String>, department: Option<String>, code: Option<String>) -> Result<()> {
    let name = prompt_or(name, Message::PromptEmployeeName, false)?;
    let position = prompt_or(position, Message::PromptEmployeePosition, true)?;
    let department = prompt_or(department, Message::PromptEmployeeDepartment, true)?;
    let code = prompt_or(code, Message::PromptEmployeeCode, false)?;

    let employee = Employee::new(&name, &position, &department, &code);
    let id = Employees::new()?.add(&employee)?;

    msg_success!(Message::EmployeeAdded(employee.code, id));
    Ok(())
}

fn handle_delete(code: String, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteEmployee(code.clone()).to_string())
            .default(false)
            .interact()?;

        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    Employees::new()?.delete_by_code(&code)?;

    msg_success!(Message::EmployeeDeleted(code));
    Ok(())
}

fn handle_list() -> Result<()> {
    let employees = Employees::new()?.list()?;

    if employees.is_empty() {
        msg_info!(Message::NoEmployees);
        return Ok(());
    }

    msg_print!(Message::EmployeesHeader, true);
    View::employees(&employees);
    Ok(())
}

fn prompt_or(value: Option<String>, prompt: Message, allow_empty: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .allow_empty(allow_empty)
            .interact_text()?),
    }
}
