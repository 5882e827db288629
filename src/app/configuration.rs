use std::env;
use std::env::VarError;

use config::{
    Config,
    ConfigError,
    File,
};
use custom_error::custom_error;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub campaign: CampaignSettings,
    pub auth: AuthSettings,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub max_pending_connections: u32,
    pub port: u16,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct CampaignSettings {
    pub base_url: String,
    pub list_key: Option<String>,
    pub timeout_secs: u64,
}

/// Credentials for the upstream provider.
///
/// Two modes are supported: a static access token (`static_token`) or an
/// OAuth refresh-token exchange (`client_id` + `client_secret` +
/// `refresh_token`). When both are configured the refreshable mode wins
/// and the static token only seeds the initial held token.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AuthSettings {
    pub token_url: String,
    pub static_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl ApplicationSettings {
    pub fn binding_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

custom_error! {
///! Custom error for missing env variable or invalid configuration files.
pub ConfigurationError
    MissingAppEnv{source:VarError} = "`APP_ENVIRONMENT` is not set \
    (possible values: [`local`|`production`]).",
    InvalidConfig{source:ConfigError} = "{source}",
}

/// Load the configuration from the directory: `configuration`.
///
/// It fails if:
/// - the `APP_ENVIRONMENT` env variable is not set
/// - the `configuration/base` file is missing
/// - the `configuration/${APP_ENVIRONMENT}` file is missing
/// - the `configuration/*` files have missing or unexpected fields
pub fn load_configuration() -> Result<Settings, ConfigurationError> {
    let mut config = Config::new();
    config.merge(File::with_name("configuration/base").required(true))?;
    let app_environment = env::var("APP_ENVIRONMENT")?;
    config.merge(File::with_name(&format!("configuration/{}", app_environment)).required(true))?;

    // Add in settings from environment variables (with a prefix of APP and '__' as
    // separator) E.g. `APP_CAMPAIGN__LIST_KEY=abc` would set
    // `Settings.campaign.list_key`
    config.merge(config::Environment::with_prefix("app").separator("__"))?;

    config.try_into().map(Ok)?
}
