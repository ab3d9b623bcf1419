use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::services::FavoritesService;
use crate::types::{Page, ProjectId};

#[derive(Subcommand)]
pub enum FavoriteCommands {
    #[command(about = "List favorite projects")]
    List {
        #[arg(long, default_value_t = 0, help = "Number of favorites to skip")]
        skip: u32,
        #[arg(long, default_value_t = Page::DEFAULT_LIMIT, help = "Maximum number to return")]
        limit: u32,
    },

    #[command(about = "Add a project to favorites")]
    Add {
        #[arg(help = "Project ID")]
        project_id: String,
    },

    #[command(about = "Remove a project from favorites")]
    Remove {
        #[arg(help = "Project ID")]
        project_id: String,
    },
}

pub async fn handle(cmd: FavoriteCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let out = &ctx.output;
    let favorites = FavoritesService::new(ctx.client.clone());

    match cmd {
        FavoriteCommands::List { skip, limit } => {
            let response = favorites
                .list(Page::new(skip, limit))
                .await
                .map_err(|e| report_client_error(out, e))?;
            let items = response.data.clone().unwrap_or_default();

            if items.is_empty() {
                return output_empty_collection(out, "favorites", "No favorites yet");
            }

            match out {
                OutputFormat::Json => output_success(out, "Favorites", Some(serde_json::to_value(&response)?)),
                OutputFormat::Text => {
                    for project in &items {
                        println!("{}  {}", project.id, project.title);
                    }
                    Ok(())
                }
            }
        }
        FavoriteCommands::Add { project_id } => {
            let project_id = ProjectId::new(project_id);
            let response = favorites.add(&project_id).await.map_err(|e| report_client_error(out, e))?;
            output_success(out, &format!("Added {} to favorites", project_id), Some(serde_json::to_value(&response)?))
        }
        FavoriteCommands::Remove { project_id } => {
            let project_id = ProjectId::new(project_id);
            let response = favorites.remove(&project_id).await.map_err(|e| report_client_error(out, e))?;
            output_success(out, &format!("Removed {} from favorites", project_id), Some(serde_json::to_value(&response)?))
        }
    }
}
