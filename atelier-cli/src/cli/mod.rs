//! Command-line surface of the admin console.

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::warn;

use crate::api::ApiClient;
use crate::config::{self, AppConfig};
use crate::media::MediaStaging;
use crate::submit::SubmissionController;

#[derive(Parser)]
#[command(
    name = "atelier-cli",
    about = "Admin console for the studio website",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the login session
    Auth {
        #[command(subcommand)]
        command: commands::auth::AuthCommands,
    },
    /// Manage portfolio projects
    Projects {
        #[command(subcommand)]
        command: commands::projects::ProjectCommands,
    },
    /// Manage events
    Events {
        #[command(subcommand)]
        command: commands::events::EventCommands,
    },
    /// Manage career openings
    Careers {
        #[command(subcommand)]
        command: commands::careers::CareerCommands,
    },
    /// Manage films
    Films {
        #[command(subcommand)]
        command: commands::films::FilmCommands,
    },
    /// Manage team members and interns
    Team {
        #[command(subcommand)]
        command: commands::team::TeamCommands,
    },
    /// Show record counts across the site's collections
    Dashboard,
}

/// Everything a command handler needs: the authenticated client, the
/// media staging area, and the submission controller.
pub struct CliContext {
    pub client: ApiClient,
    pub staging: MediaStaging,
    pub controller: SubmissionController,
}

impl CliContext {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ApiClient::http(config.base_url.clone(), config::load_session()),
            staging: MediaStaging::new(),
            controller: SubmissionController::new(),
        }
    }

    /// Write the client's current view of the session back to disk. The
    /// client drops credentials on a 401, so this also retires a stale
    /// token.
    pub fn persist_session(&self) -> Result<()> {
        let session = self.client.session();
        if session.is_authenticated() {
            config::store_session(&session)
        } else {
            config::clear_session()
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();
    let ctx = CliContext::new(&config);

    let result = match cli.command {
        Commands::Auth { command } => commands::auth::handle(&ctx, command).await,
        Commands::Projects { command } => commands::projects::handle(&ctx, command).await,
        Commands::Events { command } => commands::events::handle(&ctx, command).await,
        Commands::Careers { command } => commands::careers::handle(&ctx, command).await,
        Commands::Films { command } => commands::films::handle(&ctx, command).await,
        Commands::Team { command } => commands::team::handle(&ctx, command).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx).await,
    };

    if let Err(err) = ctx.persist_session() {
        warn!("failed to persist session: {err}");
    }
    result
}
