use crate::{
    db::users::{Role, Users},
    libs::{error::AppError, messages::Message},
    msg_bail_anyhow, msg_error_anyhow, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

/// Environment variable consulted before prompting for a password.
pub const PASSWORD_ENV: &str = "ATTENDO_PASSWORD";

/// Credentials of the account running a command.
#[derive(Debug, Clone, Args)]
pub struct AuthArgs {
    /// Account to act as; prompted for when omitted
    #[arg(short, long, global = true)]
    pub username: Option<String>,
}

impl AuthArgs {
    /// Checks the credentials and returns the account's role.
    pub fn authenticate(&self) -> Result<(String, Role)> {
        let username = match &self.username {
            Some(username) => username.clone(),
            None => Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptUsername.to_string())
                .interact_text()?,
        };
        let password = match std::env::var(PASSWORD_ENV) {
            Ok(password) => password,
            Err(_) => Password::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPassword.to_string())
                .interact()?,
        };

        let role = verify_credentials(&Users::new()?, &username, &password)?;
        Ok((username, role))
    }

    /// Authenticates and fails unless the account has the HR role.
    pub fn require_hr(&self) -> Result<String> {
        let (username, role) = self.authenticate()?;
        if role != Role::Hr {
            msg_bail_anyhow!(Message::HrRoleRequired);
        }
        tracing::debug!(username = %username, "HR access granted");
        Ok(username)
    }
}

/// Checks a username and password against the account store.
///
/// A blank username or password is refused without a lookup. Every miss is
/// reported as the same invalid-credentials error.
pub fn verify_credentials(users: &Users, username: &str, password: &str) -> Result<Role> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(msg_error_anyhow!(Message::InvalidCredentials));
    }

    match users.authenticate(username, password) {
        Ok(role) => Ok(role),
        Err(AppError::NotFound(_)) => Err(msg_error_anyhow!(Message::InvalidCredentials)),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[command(flatten)]
    auth: AuthArgs,
}

pub fn cmd(args: LoginArgs) -> Result<()> {
    let (username, role) = args.auth.authenticate()?;

    msg_success!(Message::LoginSucceeded(username, role.to_string()));
    msg_print!(Message::AvailableCommands(available_commands(role).join(", ")));
    Ok(())
}

/// Subcommands open to an account with `role`.
pub fn available_commands(role: Role) -> &'static [&'static str] {
    match role {
        Role::Hr => &["employee", "user", "report", "clock"],
        Role::Employee => &["clock"],
    }
}
