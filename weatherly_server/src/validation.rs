//! Caller input checks that run as extractors, before any upstream call.

use std::sync::LazyLock;

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use regex::Regex;
use serde::Deserialize;
use utoipa::IntoParams;
use weatherly::weather::Coordinates;

use crate::error::WeatherError;

pub const MIN_CITY_NAME_CHARS: usize = 2;
pub const MAX_CITY_NAME_CHARS: usize = 100;

static CITY_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}\s\-',.()]+$").expect("city name pattern should compile")
});

/// Check a city name. The first failing check decides the message.
pub fn validate_city_name(name: &str) -> Result<(), WeatherError> {
    if name.trim().is_empty() {
        return Err(WeatherError::validation("City name is required"));
    }
    let length = name.chars().count();
    if length < MIN_CITY_NAME_CHARS {
        return Err(WeatherError::validation(format!(
            "City name must be at least {MIN_CITY_NAME_CHARS} characters"
        )));
    }
    if length > MAX_CITY_NAME_CHARS {
        return Err(WeatherError::validation("City name is too long"));
    }
    if !CITY_NAME_PATTERN.is_match(name) {
        return Err(WeatherError::validation(
            "City name contains invalid characters",
        ));
    }
    Ok(())
}

/// Check and parse a latitude/longitude pair. The first failing check
/// decides the message.
pub fn validate_coordinates(
    lat: Option<&str>,
    lon: Option<&str>,
) -> Result<Coordinates, WeatherError> {
    let (Some(lat), Some(lon)) = (
        lat.filter(|lat| !lat.is_empty()),
        lon.filter(|lon| !lon.is_empty()),
    ) else {
        return Err(WeatherError::validation(
            "Latitude and longitude are required",
        ));
    };
    let (Some(lat), Some(lon)) = (parse_finite(lat), parse_finite(lon)) else {
        return Err(WeatherError::validation("Invalid coordinates format"));
    };
    if !(-90.0..=90.0).contains(&lat) {
        return Err(WeatherError::validation(
            "Latitude must be between -90 and 90",
        ));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(WeatherError::validation(
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(Coordinates { lat, lon })
}

fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A city name path parameter that passed [`validate_city_name`].
pub struct CityName(pub String);

impl<S> FromRequestParts<S> for CityName
where
    S: Send + Sync,
{
    type Rejection = WeatherError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(name) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WeatherError::validation(rejection.body_text()))?;
        validate_city_name(&name)?;
        Ok(Self(name))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoordinateParams {
    /// Latitude between -90 and 90.
    pub lat: Option<String>,
    /// Longitude between -180 and 180.
    pub lon: Option<String>,
}

/// `lat`/`lon` query parameters that passed [`validate_coordinates`].
pub struct ValidCoordinates(pub Coordinates);

impl<S> FromRequestParts<S> for ValidCoordinates
where
    S: Send + Sync,
{
    type Rejection = WeatherError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<CoordinateParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WeatherError::validation(rejection.body_text()))?;
        let coordinates = validate_coordinates(params.lat.as_deref(), params.lon.as_deref())?;
        Ok(Self(coordinates))
    }
}
