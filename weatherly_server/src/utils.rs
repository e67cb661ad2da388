use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

pub fn default_server_binding_addr() -> String {
    let port = dotenvy::var("PORT").unwrap_or_else(|_| "5000".to_string());
    format!("0.0.0.0:{port}")
}

pub fn default_api_key() -> Option<String> {
    dotenvy::var("OPENWEATHER_API_KEY").ok()
}

pub fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

pub fn default_geo_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

pub fn default_icon_url() -> String {
    "https://openweathermap.org/img/wn/{icon}@2x.png".to_string()
}

pub fn default_units() -> String {
    "metric".to_string()
}

pub fn default_timeout_secs() -> u64 {
    10
}

/// Deserialize a string, expanding `${VAR}` references from the environment.
pub fn deserialize_with_envsubst<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = String::deserialize(deserializer)?;
    // envsubst rejects variables whose names or values contain its own syntax.
    let variables: HashMap<String, String> = dotenvy::vars()
        .filter(|(key, value)| {
            !key.contains(['$', '{', '}']) && !value.contains(['$', '{', '}'])
        })
        .collect();
    envsubst::substitute(raw, &variables)
        .map(T::from)
        .map_err(serde::de::Error::custom)
}
