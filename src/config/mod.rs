use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// None keeps reqwest's default timeout behaviour
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Where the OAuth provider sends the browser after sign-in
    pub oauth_redirect_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        Self::for_environment(environment).with_env_overrides()
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    /// Replace the API base URL, keeping every other setting
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("COLLAB_API_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("COLLAB_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().ok();
        }
        if let Ok(v) = env::var("COLLAB_USER_AGENT") {
            self.api.user_agent = v;
        }
        if let Ok(v) = env::var("COLLAB_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("COLLAB_OAUTH_REDIRECT_URL") {
            self.auth.oauth_redirect_url = v;
        }

        self
    }

    /// Check that both configured URLs parse as absolute http(s) URLs
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_http_url("api.base_url", &self.api.base_url)?;
        check_http_url("auth.oauth_redirect_url", &self.auth.oauth_redirect_url)?;
        Ok(())
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                request_timeout_secs: None,
                user_agent: default_user_agent(),
                enable_request_logging: true,
            },
            auth: AuthConfig {
                oauth_redirect_url: "http://localhost:3000/auth/callback".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging-api.example.com/api".to_string(),
                request_timeout_secs: None,
                user_agent: default_user_agent(),
                enable_request_logging: true,
            },
            auth: AuthConfig {
                oauth_redirect_url: "https://staging.example.com/auth/callback".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://api.example.com/api".to_string(),
                request_timeout_secs: None,
                user_agent: default_user_agent(),
                enable_request_logging: false,
            },
            auth: AuthConfig {
                oauth_redirect_url: "https://app.example.com/auth/callback".to_string(),
            },
        }
    }
}

fn default_user_agent() -> String {
    format!("collab-client/{}", env!("CARGO_PKG_VERSION"))
}

fn check_http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

// Process-wide default for the CLI; library callers pass their own config
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
