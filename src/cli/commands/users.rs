use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::CliContext;
use crate::services::UserService;
use crate::validation::OnboardingInput;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Fetch your profile from the server")]
    Me,

    #[command(about = "Complete onboarding")]
    Onboarding {
        #[arg(help = "Profile headline")]
        headline: String,
        #[arg(long, help = "Comma-separated skills")]
        skills: String,
        #[arg(long, help = "Short bio")]
        bio: Option<String>,
        #[arg(long, help = "Portfolio URL")]
        portfolio_url: Option<String>,
        #[arg(long, help = "Location")]
        location: Option<String>,
        #[arg(long, help = "Hourly rate")]
        hourly_rate: Option<String>,
    },
}

pub async fn handle(cmd: UserCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let out = &ctx.output;
    let users = UserService::new(ctx.client.clone());

    match cmd {
        UserCommands::Me => {
            let response = users.me().await.map_err(|e| report_client_error(out, e))?;
            if let Some(user) = &response.data {
                ctx.session.sign_in(user.clone());
            }
            output_success(out, "Profile", Some(serde_json::to_value(&response)?))
        }
        UserCommands::Onboarding { headline, skills, bio, portfolio_url, location, hourly_rate } => {
            let input: OnboardingInput = validate_form(out, json!({
                "headline": headline,
                "skills": skills,
                "bio": bio,
                "portfolioUrl": portfolio_url,
                "location": location,
                "hourlyRate": hourly_rate
            }))?;
            let response = users
                .complete_onboarding(&input)
                .await
                .map_err(|e| report_client_error(out, e))?;
            output_success(out, "Onboarding complete", Some(serde_json::to_value(&response)?))
        }
    }
}
