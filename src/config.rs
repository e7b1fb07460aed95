use anyhow::{bail, Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub environment: Environment,
    /// Display name used in mail subjects and templates
    pub project_name: String,
    pub mailer: Option<MailerConfig>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Sender address
    pub email: String,
    pub app_password: String,
    /// Transport provider name (e.g. "gmail")
    pub provider: String,
}

pub const DEFAULT_PROJECT_NAME: &str = "Our Platform";

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .context("PORT must be set")?
                    .parse()
                    .context("PORT must be a valid port number")?,
                prefix: non_empty_var("PREFIX"),
                api_version: non_empty_var("API_VERSION"),
            },
            environment: Environment::from_env(),
            project_name: non_empty_var("PROJECT_NAME")
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            mailer: Self::mailer_config_from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn mailer_config_from_env() -> Result<Option<MailerConfig>> {
        mailer_config_from(non_empty_var)
    }
}

/// Mailer settings from `MAILER_*`, falling back to the `NODE_MAILER_*` names
/// older deployments use. All three must be set, or none.
fn mailer_config_from<F>(lookup: F) -> Result<Option<MailerConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).or_else(|| lookup(&format!("NODE_{key}")));
    let email = var("MAILER_EMAIL");
    let app_password = var("MAILER_APP_PASSWORD");
    let provider = var("MAILER_PROVIDER");

    match (email, app_password, provider) {
        (Some(email), Some(app_password), Some(provider)) => Ok(Some(MailerConfig {
            email,
            app_password,
            provider,
        })),
        (None, None, None) => Ok(None),
        _ => bail!(
            "MAILER_EMAIL, MAILER_APP_PASSWORD, and MAILER_PROVIDER (or their NODE_ names) must be set together"
        ),
    }
}

impl ServerConfig {
    /// Global route prefix, e.g. `/api/v1`. Only applied when both parts are set.
    pub fn route_prefix(&self) -> Option<String> {
        match (&self.prefix, &self.api_version) {
            (Some(prefix), Some(version)) => Some(format!(
                "/{}/{}",
                prefix.trim_matches('/'),
                version.trim_matches('/')
            )),
            _ => None,
        }
    }
}

impl Environment {
    fn from_env() -> Self {
        let value = env::var("NODE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_default();
        Self::parse(&value)
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
