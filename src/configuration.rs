use std::sync::Arc;

use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::authentication::{AdminGate, RefererGate, TokenGate};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub admin: AdminSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    // Value of `Access-Control-Allow-Origin` on every `/api` response.
    pub allowed_origin: String,
}

/// Which strategy guards the subscriber listing.
#[derive(serde::Deserialize, Clone)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AdminSettings {
    /// Accept requests whose `Referer` points at the admin page.
    Referer { admin_path: String },
    /// Accept requests carrying `Authorization: Bearer <token>`.
    Token { token: SecretString },
}

impl AdminSettings {
    /// Build the gate described by these settings.
    pub fn gate(&self) -> Arc<dyn AdminGate> {
        match self {
            AdminSettings::Referer { admin_path } => Arc::new(RefererGate::new(admin_path.clone())),
            AdminSettings::Token { token } => Arc::new(TokenGate::new(token.clone())),
        }
    }
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The possible runtime environments for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment, default to `local`
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    // Layer the environment file and `APP_`-prefixed variables over base.yaml
    // E.g. `APP_APPLICATION__PORT=5001` would set `Settings.application.port`
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
