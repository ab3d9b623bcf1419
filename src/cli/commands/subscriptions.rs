use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::models::PlanDuration;
use crate::services::SubscriptionService;
use crate::types::PlanId;

#[derive(Subcommand)]
pub enum SubscriptionCommands {
    #[command(about = "List subscription plans")]
    Plans {
        #[arg(long, help = "Billing period: monthly or yearly")]
        duration: Option<String>,
    },

    #[command(about = "Start checkout for a plan and print the payment URL")]
    Checkout {
        #[arg(help = "Plan ID")]
        plan_id: String,
    },

    #[command(about = "List your subscriptions")]
    List,
}

pub async fn handle(cmd: SubscriptionCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let out = &ctx.output;
    let subscriptions = SubscriptionService::new(ctx.client.clone());

    match cmd {
        SubscriptionCommands::Plans { duration } => {
            let duration = duration
                .map(|d| d.parse::<PlanDuration>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let response = subscriptions.plans(duration).await.map_err(|e| report_client_error(out, e))?;
            let plans = response.data.clone().unwrap_or_default();

            if plans.is_empty() {
                return output_empty_collection(out, "plans", "No plans available");
            }

            match out {
                OutputFormat::Json => output_success(out, "Plans", Some(serde_json::to_value(&response)?)),
                OutputFormat::Text => {
                    for plan in &plans {
                        println!("{}  {}  {:.2}/{}", plan.id, plan.name, plan.price, plan.duration);
                    }
                    Ok(())
                }
            }
        }
        SubscriptionCommands::Checkout { plan_id } => {
            let plan_id = PlanId::new(plan_id);
            let response = subscriptions.checkout(&plan_id).await.map_err(|e| report_client_error(out, e))?;
            let message = match &response.data {
                Some(session) => format!("Complete payment at {}", session.url),
                None => "Checkout started".to_string(),
            };
            output_success(out, &message, Some(serde_json::to_value(&response)?))
        }
        SubscriptionCommands::List => {
            let response = subscriptions.list().await.map_err(|e| report_client_error(out, e))?;
            let items = response.data.clone().unwrap_or_default();

            if items.is_empty() {
                return output_empty_collection(out, "subscriptions", "No subscriptions");
            }

            match out {
                OutputFormat::Json => output_success(out, "Subscriptions", Some(serde_json::to_value(&response)?)),
                OutputFormat::Text => {
                    for sub in &items {
                        println!("{}  plan {}  {}", sub.id, sub.plan_id, sub.status);
                    }
                    Ok(())
                }
            }
        }
    }
}
