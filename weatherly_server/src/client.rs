use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::UpstreamFailure,
    models::{
        config::UpstreamConfig,
        upstream::{
            CurrentWeatherResponse, ForecastResponse, GeocodingResult, PollutionResponse,
            UpstreamErrorBody,
        },
    },
};

/// Most city suggestions requested from the geocoding endpoint.
pub const MAX_CITY_SUGGESTIONS: usize = 5;

/// Gateway to the weather provider. Each method makes exactly one request.
#[derive(Clone)]
pub struct WeatherClient {
    config: UpstreamConfig,
    client: reqwest::Client,
}

impl WeatherClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    pub async fn current_by_city(
        &self,
        city: &str,
    ) -> Result<CurrentWeatherResponse, UpstreamFailure> {
        let params = [("q", city.to_string()), ("units", self.config.units.clone())];
        self.get(&self.config.base_url, "/weather", &params).await
    }

    pub async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentWeatherResponse, UpstreamFailure> {
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", self.config.units.clone()),
        ];
        self.get(&self.config.base_url, "/weather", &params).await
    }

    pub async fn forecast_by_city(&self, city: &str) -> Result<ForecastResponse, UpstreamFailure> {
        let params = [("q", city.to_string()), ("units", self.config.units.clone())];
        self.get(&self.config.base_url, "/forecast", &params).await
    }

    pub async fn air_quality(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<PollutionResponse, UpstreamFailure> {
        let params = [("lat", lat.to_string()), ("lon", lon.to_string())];
        self.get(&self.config.base_url, "/air_pollution", &params).await
    }

    pub async fn search_cities(
        &self,
        query: &str,
    ) -> Result<Vec<GeocodingResult>, UpstreamFailure> {
        let params = [
            ("q", query.to_string()),
            ("limit", MAX_CITY_SUGGESTIONS.to_string()),
        ];
        self.get(&self.config.geo_url, "/direct", &params).await
    }

    async fn get<ResponseModel: DeserializeOwned>(
        &self,
        base_url: &str,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<ResponseModel, UpstreamFailure> {
        let base_url = base_url.trim_end_matches("/");
        let url = format!("{base_url}{endpoint}");
        debug!("requesting {url} with {params:?}");
        let mut request = self.client.get(url).query(params);
        if let Some(api_key) = &self.config.api_key {
            request = request.query(&[("appid", api_key)]);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            // The error body is best effort; a missing or odd body still
            // classifies by status alone.
            let body = response
                .json::<UpstreamErrorBody>()
                .await
                .unwrap_or_default();
            debug!("weather service responded with {status}: {:?}", body.message);
            return Err(UpstreamFailure::Status {
                status,
                message: body.message,
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
