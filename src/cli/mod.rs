pub mod commands;
pub mod config;
pub mod utils;

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::http::ApiClient;
use crate::session::{SessionState, SessionStore};

#[derive(Parser)]
#[command(name = "collab")]
#[command(about = "Collab CLI - Command-line client for the project collaboration API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, sign up and password recovery")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Profile and onboarding")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },

    #[command(about = "Browse, create and apply to projects")]
    Projects {
        #[command(subcommand)]
        cmd: commands::projects::ProjectCommands,
    },

    #[command(about = "Manage favorite projects")]
    Favorites {
        #[command(subcommand)]
        cmd: commands::favorites::FavoriteCommands,
    },

    #[command(about = "Read and acknowledge notifications")]
    Notifications {
        #[command(subcommand)]
        cmd: commands::notifications::NotificationCommands,
    },

    #[command(about = "Subscription plans and checkout")]
    Subscriptions {
        #[command(subcommand)]
        cmd: commands::subscriptions::SubscriptionCommands,
    },

    #[command(about = "Admin panel operations")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command needs: the API client (cookies restored from the
/// saved session), the session store, and the output format
pub struct CliContext {
    pub client: ApiClient,
    pub session: SessionStore,
    pub output: OutputFormat,
    session_dir: PathBuf,
}

impl CliContext {
    pub fn load(output: OutputFormat) -> anyhow::Result<Self> {
        Self::load_from(crate::config::config().clone(), output, config::get_config_dir()?)
    }

    /// Build a context against `client_config`, restoring the session saved in `session_dir`
    pub fn load_from(client_config: ClientConfig, output: OutputFormat, session_dir: PathBuf) -> anyhow::Result<Self> {
        let client = ApiClient::new(client_config)?;
        let saved = config::load_session_from(&session_dir)?;

        client.restore_saved_cookies(&saved.cookies);

        let session = SessionStore::with_state(SessionState {
            user: saved.user,
            admin: saved.admin,
        });

        Ok(Self { client, session, output, session_dir })
    }

    /// Write the cookie jar and session state back to disk
    pub fn persist(&self) -> anyhow::Result<()> {
        let state = self.session.snapshot();
        config::save_session_to(&self.session_dir, &config::CliSession {
            cookies: self.client.saved_cookies(),
            user: state.user,
            admin: state.admin,
            saved_at: Some(Utc::now()),
        })
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = CliContext::load(output_format)?;

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx).await,
        Commands::Users { cmd } => commands::users::handle(cmd, &ctx).await,
        Commands::Projects { cmd } => commands::projects::handle(cmd, &ctx).await,
        Commands::Favorites { cmd } => commands::favorites::handle(cmd, &ctx).await,
        Commands::Notifications { cmd } => commands::notifications::handle(cmd, &ctx).await,
        Commands::Subscriptions { cmd } => commands::subscriptions::handle(cmd, &ctx).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, &ctx).await,
    };

    // Cookies may have been refreshed even by a failing call
    command_outcome(result, ctx.persist())
}

/// The command's own error wins over a failure to save the session
fn command_outcome(result: anyhow::Result<()>, persisted: anyhow::Result<()>) -> anyhow::Result<()> {
    match (result, persisted) {
        (Err(e), Err(save_err)) => {
            tracing::warn!("Failed to save CLI session: {}", save_err);
            Err(e)
        }
        (result, persisted) => result.and(persisted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_is_reported_over_save_error() {
        let err = command_outcome(Err(anyhow::anyhow!("HTTP 401: Invalid credentials")), Err(anyhow::anyhow!("disk full")))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 401: Invalid credentials");
    }

    #[test]
    fn save_error_surfaces_when_command_succeeds() {
        let err = command_outcome(Ok(()), Err(anyhow::anyhow!("disk full"))).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(command_outcome(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn output_format_defaults_to_text() {
        let cli = Cli::parse_from(["collab", "auth", "whoami"]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));

        let cli = Cli::parse_from(["collab", "--json", "favorites", "list", "--limit", "5"]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
    }
}
