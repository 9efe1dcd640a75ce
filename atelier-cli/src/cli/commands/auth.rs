//! Login session management.

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::api::Session;
use crate::cli::CliContext;

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store an admin bearer token for subsequent commands
    Login {
        /// Display name shown by `auth status` and the dashboard
        #[arg(long, default_value = "Admin")]
        name: String,
    },
    /// Drop the stored credentials
    Logout,
    /// Show whether a session is stored
    Status,
}

pub async fn handle(ctx: &CliContext, command: AuthCommands) -> Result<()> {
    match command {
        AuthCommands::Login { name } => {
            let token = rpassword::prompt_password("Admin token: ")?;
            let token = token.trim();
            if token.is_empty() {
                anyhow::bail!("token cannot be empty");
            }
            let mut session = Session::anonymous();
            session.login(token, &name);
            ctx.client.replace_session(session);
            println!("{} as {}", "Logged in".green().bold(), name.bold());
        }
        AuthCommands::Logout => {
            ctx.client.replace_session(Session::anonymous());
            println!("{}", "Logged out.".yellow());
        }
        AuthCommands::Status => {
            let session = ctx.client.session();
            if session.is_authenticated() {
                let name = session.display_name.as_deref().unwrap_or("Admin");
                println!("{} as {}", "Authenticated".green().bold(), name.bold());
            } else {
                println!("{}", "Not logged in.".yellow());
            }
        }
    }
    Ok(())
}
