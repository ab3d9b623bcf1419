use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::services::AdminService;
use crate::types::PlanId;
use crate::validation::{AdminPlanInput, LoginInput};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Login to the admin panel")]
    Login {
        #[arg(help = "Admin email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Logout from the admin panel")]
    Logout,

    #[command(about = "Refresh the admin session")]
    Refresh,

    #[command(about = "List payments")]
    Payments,

    #[command(about = "List subscription plans")]
    Plans,

    #[command(about = "Edit a subscription plan")]
    UpdatePlan {
        #[arg(help = "Plan ID")]
        plan_id: String,
        #[arg(long, help = "Plan name")]
        name: String,
        #[arg(long, help = "Plan description")]
        description: Option<String>,
        #[arg(long, help = "Price")]
        price: String,
        #[arg(long, help = "Billing period: monthly or yearly")]
        duration: String,
        #[arg(long, help = "Comma-separated feature list")]
        features: String,
        #[arg(long, default_value = "true", help = "Whether the plan is on offer")]
        active: String,
    },
}

pub async fn handle(cmd: AdminCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let out = &ctx.output;
    let admin = AdminService::new(ctx.client.clone());

    match cmd {
        AdminCommands::Login { email, password } => {
            let input: LoginInput = validate_form(out, json!({ "email": email, "password": password }))?;
            let response = admin.login(&input).await.map_err(|e| report_client_error(out, e))?;
            if let Some(payload) = &response.data {
                ctx.session.admin_sign_in(payload.admin.clone());
            }
            output_success(out, &format!("Admin logged in as {}", input.email), Some(serde_json::to_value(&response)?))
        }
        AdminCommands::Logout => {
            let response = admin.logout().await.map_err(|e| report_client_error(out, e))?;
            ctx.session.admin_sign_out();
            output_success(out, "Admin logged out", Some(serde_json::to_value(&response)?))
        }
        AdminCommands::Refresh => {
            let response = admin.refresh().await.map_err(|e| report_client_error(out, e))?;
            if let Some(payload) = &response.data {
                ctx.session.admin_sign_in(payload.admin.clone());
            }
            output_success(out, "Admin session refreshed", Some(serde_json::to_value(&response)?))
        }
        AdminCommands::Payments => {
            let response = admin.payments().await.map_err(|e| report_client_error(out, e))?;
            let payments = response.data.clone().unwrap_or_default();

            if payments.is_empty() {
                return output_empty_collection(out, "payments", "No payments");
            }

            match out {
                OutputFormat::Json => output_success(out, "Payments", Some(serde_json::to_value(&response)?)),
                OutputFormat::Text => {
                    for p in &payments {
                        println!("{}  {}  {:.2} {}  {}", p.id, p.user_id, p.amount, p.currency, p.status);
                    }
                    Ok(())
                }
            }
        }
        AdminCommands::Plans => {
            let response = admin.plans().await.map_err(|e| report_client_error(out, e))?;
            let plans = response.data.clone().unwrap_or_default();

            if plans.is_empty() {
                return output_empty_collection(out, "plans", "No plans");
            }

            match out {
                OutputFormat::Json => output_success(out, "Plans", Some(serde_json::to_value(&response)?)),
                OutputFormat::Text => {
                    for plan in &plans {
                        let state = if plan.is_active { "active" } else { "inactive" };
                        println!("{}  {}  {:.2}/{}  {}", plan.id, plan.name, plan.price, plan.duration, state);
                    }
                    Ok(())
                }
            }
        }
        AdminCommands::UpdatePlan { plan_id, name, description, price, duration, features, active } => {
            let input: AdminPlanInput = validate_form(out, json!({
                "name": name,
                "description": description,
                "price": price,
                "duration": duration,
                "features": features,
                "isActive": active
            }))?;
            let plan_id = PlanId::new(plan_id);
            let response = admin
                .update_plan(&plan_id, &input)
                .await
                .map_err(|e| report_client_error(out, e))?;
            output_success(out, &format!("Updated plan {}", plan_id), Some(serde_json::to_value(&response)?))
        }
    }
}
