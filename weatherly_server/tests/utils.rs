#![allow(dead_code)]

use reqwest::Response;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use weatherly_server::models::{
    config::{Environment, ServerConfig, UpstreamConfig, WeatherlyConfig},
    state::WeatherlyState,
};

pub const TEST_API_KEY: &str = "test-api-key";

pub async fn assert_ok_response(response: Response) -> Result<Response, String> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let body = response.text().await.map_err(|err| format!("{err:?}"))?;
        Err(body)
    }
}

/// Config pointing every upstream endpoint at `upstream_url`.
pub fn test_config(upstream_url: &str) -> WeatherlyConfig {
    WeatherlyConfig {
        server: ServerConfig::builder()
            .bind_addr("127.0.0.1:0".to_string())
            .environment(Environment::Test)
            .build(),
        upstream: UpstreamConfig::builder()
            .api_key(TEST_API_KEY.to_string())
            .base_url(upstream_url.to_string())
            .geo_url(upstream_url.to_string())
            .timeout_secs(1)
            .build(),
    }
}

/// Serve the whole app on an ephemeral port and return its base URL.
pub async fn spawn_app(config: WeatherlyConfig) -> Result<String, Box<dyn std::error::Error>> {
    let state = WeatherlyState::new(config)?;
    let router = weatherly_server::app(state);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let _ = tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(format!("http://{addr}"))
}

/// Current weather for London on 2024-01-15 at noon UTC.
pub fn current_weather_body(temp: f64) -> Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "base": "stations",
        "main": {
            "temp": temp,
            "feels_like": 14.49,
            "temp_min": 13.8,
            "temp_max": 16.51,
            "pressure": 1012,
            "humidity": 82
        },
        "visibility": 10000,
        "wind": {"speed": 4.63, "deg": 240},
        "clouds": {"all": 75},
        "dt": 1705320000,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1705305600, "sunset": 1705335600},
        "timezone": 0,
        "id": 2643743,
        "name": "London",
        "cod": 200
    })
}

fn forecast_entry(dt: i64, temp: f64, pop: f64) -> Value {
    json!({
        "dt": dt,
        "main": {
            "temp": temp,
            "feels_like": temp - 1.0,
            "temp_min": temp,
            "temp_max": temp,
            "pressure": 1010,
            "sea_level": 1010,
            "humidity": 70
        },
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
        "clouds": {"all": 0},
        "wind": {"speed": 2.1, "deg": 180, "gust": 3.4},
        "visibility": 10000,
        "pop": pop,
        "dt_txt": "ignored"
    })
}

/// Forecast timestamps: two on 2024-01-15, three on 2024-01-16.
pub const FORECAST_TIMES: [i64; 5] = [
    1_705_341_600,
    1_705_352_400,
    1_705_363_200,
    1_705_374_000,
    1_705_384_800,
];

pub fn forecast_body() -> Value {
    let list: Vec<Value> = FORECAST_TIMES
        .iter()
        .enumerate()
        .map(|(i, dt)| forecast_entry(*dt, 5.5 + i as f64, 0.25 * i as f64))
        .collect();
    json!({
        "cod": "200",
        "message": 0,
        "cnt": list.len(),
        "list": list,
        "city": {
            "id": 2643743,
            "name": "London",
            "coord": {"lat": 51.5085, "lon": -0.1257},
            "country": "GB",
            "timezone": 0
        }
    })
}

pub fn pollution_body(aqi: u8) -> Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "list": [{
            "main": {"aqi": aqi},
            "components": {
                "co": 201.94,
                "no": 0.02,
                "no2": 0.77,
                "o3": 68.66,
                "so2": 0.64,
                "pm2_5": 5.005,
                "pm10": 0.54,
                "nh3": 5.0
            },
            "dt": 1705320000
        }]
    })
}

pub fn geocoding_body() -> Value {
    json!([
        {"name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB", "state": "England"},
        {"name": "London", "lat": 42.9834, "lon": -81.233, "country": "CA", "state": "Ontario"},
        {"name": "Londonderry", "lat": 54.9966, "lon": -7.3086, "country": "GB"}
    ])
}
