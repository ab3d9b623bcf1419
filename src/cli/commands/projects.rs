use clap::Subcommand;
use serde_json::json;

use crate::access::ProjectAccess;
use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::models::Project;
use crate::services::{NewProject, ProjectService};
use crate::types::ProjectId;
use crate::validation::ApplyProjectInput;

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List projects")]
    List,

    #[command(about = "Create a project")]
    Create {
        #[arg(help = "Project title")]
        title: String,
        #[arg(long, default_value = "", help = "Project description")]
        description: String,
        #[arg(long, value_delimiter = ',', help = "Comma-separated skills")]
        skills: Vec<String>,
        #[arg(long, help = "Budget")]
        budget: Option<f64>,
    },

    #[command(about = "Apply to join a project")]
    Apply {
        #[arg(help = "Project ID")]
        project_id: String,
        #[arg(long, help = "Cover letter")]
        cover_letter: String,
        #[arg(long, help = "Expected rate")]
        expected_rate: String,
        #[arg(long, help = "Portfolio URL")]
        portfolio_url: Option<String>,
    },

    #[command(about = "Show your role on a project and the sections it unlocks")]
    Role {
        #[arg(help = "Project ID")]
        project_id: String,
    },
}

pub async fn handle(cmd: ProjectCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let out = &ctx.output;
    let projects = ProjectService::new(ctx.client.clone());

    match cmd {
        ProjectCommands::List => {
            let response = projects.list().await.map_err(|e| report_client_error(out, e))?;
            let items = response.data.clone().unwrap_or_default();

            if items.is_empty() {
                return output_empty_collection(out, "projects", "No projects found");
            }

            match out {
                OutputFormat::Json => output_success(out, "Projects", Some(serde_json::to_value(&response)?)),
                OutputFormat::Text => {
                    for project in &items {
                        print_project(project);
                    }
                    Ok(())
                }
            }
        }
        ProjectCommands::Create { title, description, skills, budget } => {
            let project = NewProject { title, description, skills, budget };
            let response = projects.create(&project).await.map_err(|e| report_client_error(out, e))?;
            output_success(out, &format!("Created project '{}'", project.title), Some(serde_json::to_value(&response)?))
        }
        ProjectCommands::Apply { project_id, cover_letter, expected_rate, portfolio_url } => {
            let input: ApplyProjectInput = validate_form(out, json!({
                "coverLetter": cover_letter,
                "expectedRate": expected_rate,
                "portfolioUrl": portfolio_url
            }))?;
            let project_id = ProjectId::new(project_id);
            let response = projects
                .apply(&project_id, &input)
                .await
                .map_err(|e| report_client_error(out, e))?;
            output_success(out, &format!("Applied to project {}", project_id), Some(serde_json::to_value(&response)?))
        }
        ProjectCommands::Role { project_id } => {
            let project_id = ProjectId::new(project_id);
            let response = projects.list().await.map_err(|e| report_client_error(out, e))?;
            let project = response
                .data
                .unwrap_or_default()
                .into_iter()
                .find(|p| p.id == project_id);

            let user_id = ctx.session.current_user_id();
            let access = ProjectAccess::resolve(project.as_ref(), user_id.as_ref());

            output_success(
                out,
                &format!("{} on {}: {}", access.role, project_id, access.sections.join(", ")),
                Some(json!({ "role": access.role, "sections": access.sections })),
            )
        }
    }
}

fn print_project(project: &Project) {
    println!(
        "{}  {}  ({} contributors)",
        project.id,
        project.title,
        project.contributors.len()
    );
}
