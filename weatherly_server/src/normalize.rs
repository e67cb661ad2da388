//! Shaping of provider payloads into the response entities.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use weatherly::weather::{
    AirQualitySnapshot, AqiLevel, CitySuggestion, Condition, Coordinates, DayBucket,
    ForecastBundle, IntervalSample, Pollutants, SampleTemperature, Temperature, WeatherSnapshot,
    Wind,
};

use crate::models::upstream::{
    ConditionEntry, CurrentWeatherResponse, ForecastEntry, ForecastResponse, GeocodingResult,
    PollutionResponse,
};

/// A provider payload that decoded fine but can't be shaped.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("weather service returned no weather condition")]
    MissingCondition,
    #[error("weather service returned no air quality readings")]
    EmptyPollutionList,
    #[error("weather service returned air quality index {0}, expected 1 to 5")]
    AqiOutOfRange(u8),
    #[error("weather service returned out of range timestamp {0}")]
    InvalidTimestamp(i64),
}

#[derive(Clone, Debug)]
pub struct Normalizer {
    icon_url: String,
}

impl Normalizer {
    /// `icon_url` is a template where `{icon}` gets replaced by an icon code.
    pub fn new(icon_url: String) -> Self {
        Self { icon_url }
    }

    pub fn shape_current_weather(
        &self,
        raw: CurrentWeatherResponse,
    ) -> Result<WeatherSnapshot, ShapeError> {
        let weather = self.shape_condition(raw.weather)?;
        Ok(WeatherSnapshot {
            city: raw.name,
            country: raw.sys.country,
            coordinates: Coordinates {
                lat: raw.coord.lat,
                lon: raw.coord.lon,
            },
            weather,
            temperature: Temperature {
                current: round_temperature(raw.main.temp),
                feels_like: round_temperature(raw.main.feels_like),
                min: round_temperature(raw.main.temp_min),
                max: round_temperature(raw.main.temp_max),
            },
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            wind: Wind {
                speed: raw.wind.speed,
                deg: raw.wind.deg,
            },
            clouds: raw.clouds.all,
            visibility: raw.visibility,
            sunrise: unix_timestamp(raw.sys.sunrise)?,
            sunset: unix_timestamp(raw.sys.sunset)?,
            timezone: raw.timezone,
            timestamp: unix_timestamp(raw.dt)?,
        })
    }

    /// Group forecast samples into days by the UTC date of their timestamp.
    ///
    /// Runs of samples sharing a date become one bucket, so concatenating the
    /// buckets always gives back the provider's order.
    pub fn shape_forecast(&self, raw: ForecastResponse) -> Result<ForecastBundle, ShapeError> {
        let mut daily_forecasts: Vec<DayBucket> = Vec::new();
        for entry in raw.list {
            let sample = self.shape_sample(entry)?;
            let date = sample.time.date_naive();
            match daily_forecasts.last_mut() {
                Some(bucket) if bucket.date == date => bucket.forecasts.push(sample),
                _ => daily_forecasts.push(DayBucket {
                    date,
                    forecasts: vec![sample],
                }),
            }
        }
        Ok(ForecastBundle {
            city: raw.city.name,
            country: raw.city.country,
            coordinates: Coordinates {
                lat: raw.city.coord.lat,
                lon: raw.city.coord.lon,
            },
            daily_forecasts,
        })
    }

    fn shape_sample(&self, entry: ForecastEntry) -> Result<IntervalSample, ShapeError> {
        Ok(IntervalSample {
            time: unix_timestamp(entry.dt)?,
            temperature: SampleTemperature {
                temp: round_temperature(entry.main.temp),
                feels_like: round_temperature(entry.main.feels_like),
                min: round_temperature(entry.main.temp_min),
                max: round_temperature(entry.main.temp_max),
            },
            weather: self.shape_condition(entry.weather)?,
            humidity: entry.main.humidity,
            wind: Wind {
                speed: entry.wind.speed,
                deg: entry.wind.deg,
            },
            clouds: entry.clouds.all,
            pop: percent(entry.pop),
        })
    }

    /// Only the first condition is kept; the provider lists the primary one first.
    fn shape_condition(&self, conditions: Vec<ConditionEntry>) -> Result<Condition, ShapeError> {
        let condition = conditions
            .into_iter()
            .next()
            .ok_or(ShapeError::MissingCondition)?;
        Ok(Condition {
            icon_url: self.icon_url(&condition.icon),
            main: condition.main,
            description: condition.description,
            icon: condition.icon,
        })
    }

    pub fn icon_url(&self, icon: &str) -> String {
        self.icon_url.replace("{icon}", icon)
    }
}

pub fn shape_air_quality(raw: PollutionResponse) -> Result<AirQualitySnapshot, ShapeError> {
    let entry = raw
        .list
        .into_iter()
        .next()
        .ok_or(ShapeError::EmptyPollutionList)?;
    let level = AqiLevel::try_from(entry.main.aqi).map_err(ShapeError::AqiOutOfRange)?;
    let components = entry.components;
    let components = Pollutants {
        co: format_concentration(components.co),
        no: format_concentration(components.no),
        no2: format_concentration(components.no2),
        o3: format_concentration(components.o3),
        so2: format_concentration(components.so2),
        pm2_5: format_concentration(components.pm2_5),
        pm10: format_concentration(components.pm10),
        nh3: format_concentration(components.nh3),
    };
    Ok(AirQualitySnapshot::new(
        level,
        components,
        unix_timestamp(entry.dt)?,
    ))
}

pub fn shape_city_suggestions(raw: Vec<GeocodingResult>) -> Vec<CitySuggestion> {
    raw.into_iter()
        .map(|city| CitySuggestion::new(city.name, city.country, city.state, city.lat, city.lon))
        .collect()
}

/// Round half away from zero to a whole degree.
pub fn round_temperature(value: f64) -> i64 {
    value.round() as i64
}

/// Convert a 0 to 1 probability into a rounded percentage.
pub fn percent(probability: f64) -> u8 {
    (probability * 100.0).round() as u8
}

pub fn unix_timestamp(seconds: i64) -> Result<DateTime<Utc>, ShapeError> {
    DateTime::from_timestamp(seconds, 0).ok_or(ShapeError::InvalidTimestamp(seconds))
}

/// Render a concentration with exactly two fraction digits, rounding half
/// away from zero.
///
/// Rounding works on the shortest decimal representation of the value, so
/// `5.005` becomes `"5.01"` even though the nearest binary float is slightly
/// below it.
pub fn format_concentration(value: f64) -> String {
    match value.to_string().parse::<Decimal>() {
        Ok(decimal) => {
            let rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            if rounded.is_zero() {
                format!("{:.2}", Decimal::ZERO)
            } else {
                format!("{rounded:.2}")
            }
        }
        Err(_) => format!("{value:.2}"),
    }
}
