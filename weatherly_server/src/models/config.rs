use crate::utils;
use bon::Builder;
use serde::Deserialize;
use std::fmt;

/// Placeholder API key shipped in example `.env` files.
pub const API_KEY_PLACEHOLDER: &str = "your_api_key_here";

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        };
        write!(f, "{repr}")
    }
}

#[derive(Builder, Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "utils::default_server_binding_addr")]
    #[builder(default = utils::default_server_binding_addr())]
    pub bind_addr: String,
    #[serde(default)]
    #[builder(default)]
    pub environment: Environment,
    /// Origins allowed by CORS. Any origin is allowed when empty.
    #[serde(default)]
    #[builder(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Builder, Clone, Debug, Deserialize)]
pub struct UpstreamConfig {
    #[serde(
        default = "utils::default_api_key",
        deserialize_with = "utils::deserialize_with_envsubst"
    )]
    pub api_key: Option<String>,
    #[serde(default = "utils::default_base_url")]
    #[builder(default = utils::default_base_url())]
    pub base_url: String,
    #[serde(default = "utils::default_geo_url")]
    #[builder(default = utils::default_geo_url())]
    pub geo_url: String,
    /// Icon URL template. `{icon}` is replaced by the provider's icon code.
    #[serde(default = "utils::default_icon_url")]
    #[builder(default = utils::default_icon_url())]
    pub icon_url: String,
    #[serde(default = "utils::default_units")]
    #[builder(default = utils::default_units())]
    pub units: String,
    #[serde(default = "utils::default_timeout_secs")]
    #[builder(default = utils::default_timeout_secs())]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::builder().maybe_api_key(utils::default_api_key()).build()
    }
}

impl UpstreamConfig {
    /// Whether a usable API key is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| {
            let key = key.trim();
            !key.is_empty() && key != API_KEY_PLACEHOLDER && !key.contains("${")
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WeatherlyConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}
