use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::services::NotificationService;
use crate::types::NotificationId;

#[derive(Subcommand)]
pub enum NotificationCommands {
    #[command(about = "List notifications")]
    List,

    #[command(about = "Mark one notification as read")]
    Read {
        #[arg(help = "Notification ID")]
        id: String,
    },

    #[command(about = "Mark every notification as read")]
    ReadAll,
}

pub async fn handle(cmd: NotificationCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let out = &ctx.output;
    let notifications = NotificationService::new(ctx.client.clone());

    match cmd {
        NotificationCommands::List => {
            let response = notifications.list().await.map_err(|e| report_client_error(out, e))?;
            let items = response.data.clone().unwrap_or_default();

            if items.is_empty() {
                return output_empty_collection(out, "notifications", "No notifications");
            }

            match out {
                OutputFormat::Json => output_success(out, "Notifications", Some(serde_json::to_value(&response)?)),
                OutputFormat::Text => {
                    for n in &items {
                        let marker = if n.read { " " } else { "*" };
                        println!("{} {}  {}", marker, n.id, n.message);
                    }
                    Ok(())
                }
            }
        }
        NotificationCommands::Read { id } => {
            let id = NotificationId::new(id);
            let response = notifications.mark_read(&id).await.map_err(|e| report_client_error(out, e))?;
            output_success(out, &format!("Marked {} as read", id), Some(serde_json::to_value(&response)?))
        }
        NotificationCommands::ReadAll => {
            let response = notifications.mark_all_read().await.map_err(|e| report_client_error(out, e))?;
            output_success(out, "Marked all notifications as read", Some(serde_json::to_value(&response)?))
        }
    }
}
