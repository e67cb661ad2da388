use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Weather condition as reported by the provider.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition group, e.g. "Rain".
    pub main: String,
    pub description: String,
    /// Provider icon code, e.g. "10d".
    pub icon: String,
    /// Full URL of the icon image.
    pub icon_url: String,
}

/// Rounded temperatures of a current weather observation.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub current: i64,
    pub feels_like: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct Wind {
    pub speed: f64,
    pub deg: u16,
}

/// Current weather for a single location.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Empty for locations outside any named place, like open water.
    pub city: String,
    /// Two-letter country code, absent for open water.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub coordinates: Coordinates,
    pub weather: Condition,
    pub temperature: Temperature,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Atmospheric pressure in hPa.
    pub pressure: u32,
    pub wind: Wind,
    /// Cloud cover in percent.
    pub clouds: u8,
    /// Visibility in meters. The provider omits it for some stations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
    #[serde(with = "crate::timestamp")]
    pub sunrise: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub sunset: DateTime<Utc>,
    /// Shift in seconds from UTC.
    pub timezone: i32,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Rounded temperatures of a single forecast interval.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SampleTemperature {
    pub temp: i64,
    pub feels_like: i64,
    pub min: i64,
    pub max: i64,
}

/// One 3-hour step of a forecast.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct IntervalSample {
    #[serde(with = "crate::timestamp")]
    pub time: DateTime<Utc>,
    pub temperature: SampleTemperature,
    pub weather: Condition,
    pub humidity: u8,
    pub wind: Wind,
    pub clouds: u8,
    /// Probability of precipitation in percent.
    pub pop: u8,
}

/// All forecast intervals falling on one UTC calendar date.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub forecasts: Vec<IntervalSample>,
}

/// Multi-day forecast for a single city, grouped by day.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastBundle {
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub coordinates: Coordinates,
    pub daily_forecasts: Vec<DayBucket>,
}

/// Air quality index on the provider's 1 to 5 scale.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize, ToSchema)]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
}

impl AqiLevel {
    pub fn index(self) -> u8 {
        match self {
            Self::Good => 1,
            Self::Fair => 2,
            Self::Moderate => 3,
            Self::Poor => 4,
            Self::VeryPoor => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    pub fn color(self) -> SeverityColor {
        match self {
            Self::Good => SeverityColor::Green,
            Self::Fair => SeverityColor::Yellow,
            Self::Moderate => SeverityColor::Orange,
            Self::Poor => SeverityColor::Red,
            Self::VeryPoor => SeverityColor::Purple,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory",
            Self::Fair => "Air quality is acceptable",
            Self::Moderate => "Air quality is moderate",
            Self::Poor => "Air quality is unhealthy",
            Self::VeryPoor => "Air quality is hazardous",
        }
    }
}

impl TryFrom<u8> for AqiLevel {
    /// The out-of-range index.
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            1 => Ok(Self::Good),
            2 => Ok(Self::Fair),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::Poor),
            5 => Ok(Self::VeryPoor),
            other => Err(other),
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pollutant concentrations in μg/m³, each with exactly two fraction digits.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pollutants {
    /// Carbon monoxide.
    pub co: String,
    /// Nitrogen monoxide.
    pub no: String,
    /// Nitrogen dioxide.
    pub no2: String,
    /// Ozone.
    pub o3: String,
    /// Sulphur dioxide.
    pub so2: String,
    /// Fine particulate matter.
    pub pm2_5: String,
    /// Coarse particulate matter.
    pub pm10: String,
    /// Ammonia.
    pub nh3: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct AirQualitySnapshot {
    pub aqi: u8,
    pub level: AqiLevel,
    pub color: SeverityColor,
    pub description: String,
    pub components: Pollutants,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl AirQualitySnapshot {
    pub fn new(level: AqiLevel, components: Pollutants, timestamp: DateTime<Utc>) -> Self {
        Self {
            aqi: level.index(),
            level,
            color: level.color(),
            description: level.description().to_string(),
            components,
            timestamp,
        }
    }
}

/// A geocoding match offered for city autocomplete.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    /// Region or state, empty when the provider has none.
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl CitySuggestion {
    pub fn new(name: String, country: String, state: Option<String>, lat: f64, lon: f64) -> Self {
        let state = state.unwrap_or_default();
        let display_name = if state.is_empty() {
            format!("{name}, {country}")
        } else {
            format!("{name}, {state}, {country}")
        };
        Self {
            name,
            country,
            state,
            lat,
            lon,
            display_name,
        }
    }
}
