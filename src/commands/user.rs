use super::login::AuthArgs;
use crate::{
    db::users::{Role, Users},
    libs::{messages::Message, view::View},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(flatten)]
    auth: AuthArgs,

    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Create an account; the password is always prompted for
    Add {
        /// Name of the new account
        name: Option<String>,
        /// HR or Employee
        #[arg(short, long)]
        role: Option<String>,
    },
    List,
}

pub fn cmd(args: UserArgs) -> Result<()> {
    args.auth.require_hr()?;

    match args.command {
        UserCommand::Add { name, role } => handle_add(name, role),
        UserCommand::List => handle_list(),
    }
}

fn handle_add(name: Option<String>, role: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };

    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordMismatch.to_string())
        .interact()?;

    let role = match role {
        Some(role) => role,
        None => {
            let roles = [Role::Hr, Role::Employee];
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRole.to_string())
                .items(&roles.iter().map(|r| r.to_string()).collect::<Vec<_>>())
                .default(1)
                .interact()?;
            roles[selection].to_string()
        }
    };

    let user = Users::new()?.add(&name, &password, &role)?;

    msg_success!(Message::UserCreated(user.username, user.role.to_string()));
    Ok(())
}

fn handle_list() -> Result<()> {
    let users = Users::new()?.list()?;

    msg_print!(Message::UsersHeader, true);
    View::users(&users);
    Ok(())
}
