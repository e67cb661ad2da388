use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::debug;
use utoipa_axum::{router::OpenApiRouter, routes};
use weatherly::{
    Failure, Success,
    weather::{AirQualitySnapshot, CitySuggestion, ForecastBundle, WeatherSnapshot},
};

use crate::{
    error::WeatherError,
    models::state::WeatherlyState,
    normalize,
    validation::{CityName, CoordinateParams, ValidCoordinates},
};

pub fn router(state: WeatherlyState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_weather_by_city))
        .routes(routes!(get_weather_by_coordinates))
        .routes(routes!(get_forecast_by_city))
        .routes(routes!(get_air_quality))
        .routes(routes!(search_cities))
        .with_state(state)
}

/// Get current weather for a city.
#[utoipa::path(
    get,
    path = "/city/{cityName}",
    params(
        ("cityName" = String, Path, description = "City to get the weather for")
    ),
    responses(
        (status = 200, description = "Successfully got current weather", body = Success<WeatherSnapshot>),
        (status = 400, description = "City name is malformed", body = Failure),
        (status = 404, description = "Weather service doesn't know the city", body = Failure),
        (status = 503, description = "Weather service is unreachable", body = Failure)
    )
)]
#[axum::debug_handler]
pub async fn get_weather_by_city(
    State(state): State<WeatherlyState>,
    CityName(city): CityName,
) -> Result<Json<Success<WeatherSnapshot>>, WeatherError> {
    let raw = state.weather_client.current_by_city(&city).await?;
    let snapshot = state.normalizer.shape_current_weather(raw)?;
    Ok(Json(Success::new(snapshot)))
}

/// Get current weather at a latitude/longitude.
#[utoipa::path(
    get,
    path = "/coordinates",
    params(CoordinateParams),
    responses(
        (status = 200, description = "Successfully got current weather", body = Success<WeatherSnapshot>),
        (status = 400, description = "Coordinates are missing or out of range", body = Failure),
        (status = 503, description = "Weather service is unreachable", body = Failure)
    )
)]
#[axum::debug_handler]
pub async fn get_weather_by_coordinates(
    State(state): State<WeatherlyState>,
    ValidCoordinates(coordinates): ValidCoordinates,
) -> Result<Json<Success<WeatherSnapshot>>, WeatherError> {
    let raw = state
        .weather_client
        .current_by_coordinates(coordinates.lat, coordinates.lon)
        .await?;
    let snapshot = state.normalizer.shape_current_weather(raw)?;
    Ok(Json(Success::new(snapshot)))
}

/// Get a 5-day forecast for a city in 3-hour steps, grouped by day.
#[utoipa::path(
    get,
    path = "/forecast/{cityName}",
    params(
        ("cityName" = String, Path, description = "City to get the forecast for")
    ),
    responses(
        (status = 200, description = "Successfully got forecast", body = Success<ForecastBundle>),
        (status = 400, description = "City name is malformed", body = Failure),
        (status = 404, description = "Weather service doesn't know the city", body = Failure),
        (status = 503, description = "Weather service is unreachable", body = Failure)
    )
)]
#[axum::debug_handler]
pub async fn get_forecast_by_city(
    State(state): State<WeatherlyState>,
    CityName(city): CityName,
) -> Result<Json<Success<ForecastBundle>>, WeatherError> {
    let raw = state.weather_client.forecast_by_city(&city).await?;
    debug!("got {} forecast samples for {city}", raw.list.len());
    let bundle = state.normalizer.shape_forecast(raw)?;
    Ok(Json(Success::new(bundle)))
}

/// Get the air quality index and pollutant concentrations at a latitude/longitude.
#[utoipa::path(
    get,
    path = "/air-quality",
    params(CoordinateParams),
    responses(
        (status = 200, description = "Successfully got air quality", body = Success<AirQualitySnapshot>),
        (status = 400, description = "Coordinates are missing or out of range", body = Failure),
        (status = 502, description = "Weather service sent an unusable reading", body = Failure),
        (status = 503, description = "Weather service is unreachable", body = Failure)
    )
)]
#[axum::debug_handler]
pub async fn get_air_quality(
    State(state): State<WeatherlyState>,
    ValidCoordinates(coordinates): ValidCoordinates,
) -> Result<Json<Success<AirQualitySnapshot>>, WeatherError> {
    let raw = state
        .weather_client
        .air_quality(coordinates.lat, coordinates.lon)
        .await?;
    let snapshot = normalize::shape_air_quality(raw)?;
    Ok(Json(Success::new(snapshot)))
}

/// Search cities by name for autocomplete. Returns at most 5 matches.
#[utoipa::path(
    get,
    path = "/search/{query}",
    params(
        ("query" = String, Path, description = "Free-text city name to search for")
    ),
    responses(
        (status = 200, description = "Successfully searched cities", body = Success<Vec<CitySuggestion>>),
        (status = 503, description = "Weather service is unreachable", body = Failure)
    )
)]
#[axum::debug_handler]
pub async fn search_cities(
    State(state): State<WeatherlyState>,
    Path(query): Path<String>,
) -> Result<Json<Success<Vec<CitySuggestion>>>, WeatherError> {
    let raw = state.weather_client.search_cities(&query).await?;
    let suggestions = normalize::shape_city_suggestions(raw);
    Ok(Json(Success::new(suggestions)))
}
