//! Typed payloads of the OpenWeatherMap endpoints the server calls.
//!
//! Only the fields that get shaped are declared; everything else the
//! provider sends is ignored.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ConditionEntry {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WindReadings {
    pub speed: f64,
    pub deg: u16,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CloudCover {
    pub all: u8,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SystemInfo {
    /// Missing for coordinates over open water.
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// `GET /weather`
#[derive(Clone, Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub name: String,
    pub coord: Coord,
    pub weather: Vec<ConditionEntry>,
    pub main: MainReadings,
    pub wind: WindReadings,
    pub clouds: CloudCover,
    #[serde(default)]
    pub visibility: Option<u32>,
    pub sys: SystemInfo,
    pub timezone: i32,
    pub dt: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<ConditionEntry>,
    pub wind: WindReadings,
    pub clouds: CloudCover,
    /// Probability of precipitation between 0 and 1.
    #[serde(default)]
    pub pop: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub coord: Coord,
}

/// `GET /forecast`
#[derive(Clone, Debug, Deserialize)]
pub struct ForecastResponse {
    pub city: ForecastCity,
    pub list: Vec<ForecastEntry>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct AqiReading {
    pub aqi: u8,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Components {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PollutionEntry {
    pub dt: i64,
    pub main: AqiReading,
    pub components: Components,
}

/// `GET /air_pollution`
#[derive(Clone, Debug, Deserialize)]
pub struct PollutionResponse {
    pub list: Vec<PollutionEntry>,
}

/// One element of `GET /geo/1.0/direct`.
#[derive(Clone, Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Body the provider sends alongside non-2xx statuses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
