use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::CliContext;
use crate::guard::{GuardRoutes, RouteGuard};
use crate::services::AuthService;
use crate::validation::{
    ForgotPasswordInput, LoginInput, ResetPasswordInput, SignupInput, VerifyOtpInput,
};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with email and password")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Register a new account")]
    Register {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
        #[arg(long, help = "Password confirmation")]
        confirm_password: String,
    },

    #[command(about = "Logout and clear the saved session")]
    Logout,

    #[command(about = "Refresh the session cookie")]
    Refresh,

    #[command(about = "Show the signed-in user")]
    Whoami,

    #[command(about = "Request a password reset code")]
    ForgotPassword {
        #[arg(help = "Email")]
        email: String,
    },

    #[command(about = "Verify a password reset code")]
    VerifyOtp {
        #[arg(help = "Email")]
        email: String,
        #[arg(help = "Six digit code")]
        otp: String,
    },

    #[command(about = "Set a new password")]
    ResetPassword {
        #[arg(help = "Reset token")]
        token: String,
        #[arg(long, help = "New password")]
        password: String,
        #[arg(long, help = "Password confirmation")]
        confirm_password: String,
    },

    #[command(about = "Print the browser URL that starts an OAuth sign-in")]
    OauthUrl {
        #[arg(default_value = "google", help = "OAuth provider")]
        provider: String,
    },

    #[command(about = "Show where the auth guard sends the current session from a page")]
    Guard {
        #[arg(help = "Client route, e.g. /login")]
        path: String,
    },
}

pub async fn handle(cmd: AuthCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let out = &ctx.output;
    let auth = AuthService::new(ctx.client.clone());

    match cmd {
        AuthCommands::Login { email, password } => {
            let input: LoginInput = validate_form(out, json!({ "email": email, "password": password }))?;
            let response = auth.login(&input).await.map_err(|e| report_client_error(out, e))?;

            if let Some(payload) = &response.data {
                ctx.session.sign_in(payload.user.clone());
            }
            output_success(out, &format!("Logged in as {}", input.email), Some(serde_json::to_value(&response)?))
        }
        AuthCommands::Register { name, email, password, confirm_password } => {
            let input: SignupInput = validate_form(out, json!({
                "name": name,
                "email": email,
                "password": password,
                "confirmPassword": confirm_password
            }))?;
            let response = auth.register(&input).await.map_err(|e| report_client_error(out, e))?;

            if let Some(payload) = &response.data {
                ctx.session.sign_in(payload.user.clone());
            }
            output_success(out, &format!("Registered {}", input.email), Some(serde_json::to_value(&response)?))
        }
        AuthCommands::Logout => {
            let response = auth.logout().await.map_err(|e| report_client_error(out, e))?;
            ctx.session.sign_out();
            output_success(out, "Logged out", Some(serde_json::to_value(&response)?))
        }
        AuthCommands::Refresh => {
            let response = auth.refresh().await.map_err(|e| report_client_error(out, e))?;
            if let Some(payload) = &response.data {
                ctx.session.sign_in(payload.user.clone());
            }
            output_success(out, "Session refreshed", Some(serde_json::to_value(&response)?))
        }
        AuthCommands::Whoami => match ctx.session.snapshot().user {
            Some(user) => {
                let message = format!("{} <{}> ({})", user.name, user.email, user.id);
                output_success(out, &message, Some(serde_json::to_value(&user)?))
            }
            None => Err(anyhow::anyhow!("Not logged in")),
        },
        AuthCommands::ForgotPassword { email } => {
            let input: ForgotPasswordInput = validate_form(out, json!({ "email": email }))?;
            let response = auth.forgot_password(&input).await.map_err(|e| report_client_error(out, e))?;
            output_success(out, &format!("Reset code sent to {}", input.email), Some(serde_json::to_value(&response)?))
        }
        AuthCommands::VerifyOtp { email, otp } => {
            let input: VerifyOtpInput = validate_form(out, json!({ "email": email, "otp": otp }))?;
            let response = auth.verify_otp(&input).await.map_err(|e| report_client_error(out, e))?;
            output_success(out, "Code verified", Some(serde_json::to_value(&response)?))
        }
        AuthCommands::ResetPassword { token, password, confirm_password } => {
            let input: ResetPasswordInput = validate_form(out, json!({
                "token": token,
                "password": password,
                "confirmPassword": confirm_password
            }))?;
            let response = auth.reset_password(&input).await.map_err(|e| report_client_error(out, e))?;
            output_success(out, "Password updated", Some(serde_json::to_value(&response)?))
        }
        AuthCommands::OauthUrl { provider } => {
            let url = auth.oauth_url(&provider)?;
            match out {
                crate::cli::OutputFormat::Json => output_success(out, "OAuth URL", Some(json!({ "url": url.as_str() }))),
                crate::cli::OutputFormat::Text => {
                    println!("{}", url);
                    Ok(())
                }
            }
        }
        AuthCommands::Guard { path } => {
            let state = ctx.session.snapshot();
            let guard_routes = if path.starts_with("/admin") { GuardRoutes::ADMIN } else { GuardRoutes::USER };

            let mut guard = RouteGuard::with_routes(Vec::new(), guard_routes);
            guard.evaluate_path(guard_routes.subject(&state), &path);

            match guard.into_navigator().first() {
                Some(target) => output_success(out, &format!("Redirect {} -> {}", path, target), Some(json!({ "redirect": target }))),
                None => output_success(out, &format!("Stay on {}", path), Some(json!({ "redirect": null }))),
            }
        }
    }
}
