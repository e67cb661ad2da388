use reqwest::StatusCode;
use serde_json::Value;
use weatherly::{
    Failure,
    health::{HealthStatus, Readiness},
};
use weatherly_server::models::config::{
    API_KEY_PLACEHOLDER, Environment, ServerConfig, UpstreamConfig, WeatherlyConfig,
};

mod utils;

#[tokio::test]
async fn health_reports_running() -> Result<(), Box<dyn std::error::Error>> {
    let app_url = utils::spawn_app(utils::test_config("http://127.0.0.1:1")).await?;
    let response = reqwest::Client::new()
        .get(format!("{app_url}/api/health"))
        .send()
        .await?;
    let response = utils::assert_ok_response(response).await?;
    let status = response.json::<HealthStatus>().await?;
    assert!(status.success);
    assert_eq!(status.message, "Weather API is running");
    assert_eq!(status.environment, "test");
    assert!(status.uptime >= 0.0);
    Ok(())
}

#[tokio::test]
async fn ready_when_api_key_configured() -> Result<(), Box<dyn std::error::Error>> {
    let app_url = utils::spawn_app(utils::test_config("http://127.0.0.1:1")).await?;
    let response = reqwest::Client::new()
        .get(format!("{app_url}/api/health/ready"))
        .send()
        .await?;
    let response = utils::assert_ok_response(response).await?;
    let readiness = response.json::<Readiness>().await?;
    assert!(readiness.success);
    assert!(readiness.ready);
    Ok(())
}

async fn readiness_without_key(
    api_key: Option<String>,
) -> Result<(StatusCode, Readiness), Box<dyn std::error::Error>> {
    let config = WeatherlyConfig {
        server: ServerConfig::builder()
            .environment(Environment::Test)
            .build(),
        upstream: UpstreamConfig::builder().maybe_api_key(api_key).build(),
    };
    let app_url = utils::spawn_app(config).await?;
    let response = reqwest::Client::new()
        .get(format!("{app_url}/api/health/ready"))
        .send()
        .await?;
    let status = response.status();
    Ok((status, response.json::<Readiness>().await?))
}

#[tokio::test]
async fn not_ready_without_usable_api_key() -> Result<(), Box<dyn std::error::Error>> {
    for api_key in [
        None,
        Some(String::new()),
        Some(API_KEY_PLACEHOLDER.to_string()),
        Some("${OPENWEATHER_API_KEY}".to_string()),
    ] {
        let (status, readiness) = readiness_without_key(api_key).await?;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!readiness.success);
        assert!(!readiness.ready);
        assert_eq!(
            readiness.message,
            "Service not ready - API key not configured"
        );
    }
    Ok(())
}

#[tokio::test]
async fn unknown_routes_get_json_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let app_url = utils::spawn_app(utils::test_config("http://127.0.0.1:1")).await?;
    let response = reqwest::Client::new()
        .get(format!("{app_url}/api/nowhere"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let failure = response.json::<Failure>().await?;
    assert!(!failure.success);
    assert_eq!(failure.message, "Route not found");
    assert_eq!(failure.kind, None);
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_weather_routes() -> Result<(), Box<dyn std::error::Error>> {
    let app_url = utils::spawn_app(utils::test_config("http://127.0.0.1:1")).await?;
    let response = reqwest::Client::new()
        .get(format!("{app_url}/api-docs/openapi.json"))
        .send()
        .await?;
    let response = utils::assert_ok_response(response).await?;
    let openapi = response.json::<Value>().await?;
    let paths = openapi["paths"]
        .as_object()
        .ok_or("openapi document has no paths")?;
    for path in [
        "/api/weather/city/{cityName}",
        "/api/weather/coordinates",
        "/api/weather/forecast/{cityName}",
        "/api/weather/air-quality",
        "/api/weather/search/{query}",
        "/api/health/ready",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    Ok(())
}

async fn cors_headers(
    allowed_origins: Vec<String>,
) -> Result<(Option<String>, Option<String>), Box<dyn std::error::Error>> {
    let mut config = utils::test_config("http://127.0.0.1:1");
    config.server.allowed_origins = allowed_origins;
    let app_url = utils::spawn_app(config).await?;
    let response = reqwest::Client::new()
        .get(format!("{app_url}/api/health"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await?;
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    Ok((
        header("access-control-allow-origin"),
        header("access-control-allow-credentials"),
    ))
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let (origin, credentials) = cors_headers(vec![]).await?;
    assert_eq!(origin.as_deref(), Some("*"));
    assert_eq!(credentials, None);
    Ok(())
}

#[tokio::test]
async fn cors_echoes_configured_origin_with_credentials() -> Result<(), Box<dyn std::error::Error>>
{
    let (origin, credentials) = cors_headers(vec!["http://localhost:5173".to_string()]).await?;
    assert_eq!(origin.as_deref(), Some("http://localhost:5173"));
    assert_eq!(credentials.as_deref(), Some("true"));

    let (origin, _) = cors_headers(vec!["https://weather.example.com".to_string()]).await?;
    assert_eq!(origin, None);
    Ok(())
}
