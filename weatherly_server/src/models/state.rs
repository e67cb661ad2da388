use crate::{
    client::WeatherClient,
    models::config::{ServerConfig, WeatherlyConfig},
    normalize::Normalizer,
};
use std::time::Instant;

#[derive(Clone)]
pub struct WeatherlyState {
    pub server_config: ServerConfig,
    pub weather_client: WeatherClient,
    pub normalizer: Normalizer,
    pub started_at: Instant,
}

impl WeatherlyState {
    pub fn new(config: WeatherlyConfig) -> Result<Self, reqwest::Error> {
        let WeatherlyConfig { server, upstream } = config;
        let normalizer = Normalizer::new(upstream.icon_url.clone());
        let weather_client = WeatherClient::new(upstream)?;
        Ok(Self {
            server_config: server,
            weather_client,
            normalizer,
            started_at: Instant::now(),
        })
    }
}
