use std::fs::File;

use axum::{
    Router,
    http::{HeaderValue, Method},
};
use ctrlc::set_handler;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod routes;
mod utils;
pub mod validation;

#[derive(OpenApi)]
#[openapi(info(
    title = "Weather Lookup Server",
    description = "Current weather, forecasts, air quality and city search reshaped from OpenWeatherMap"
))]
struct ApiDoc;

/// Read the config file named by `WEATHERLY_CONFIG_PATH`, or fall back to
/// defaults and environment variables when it isn't set.
pub fn load_config() -> Result<models::config::WeatherlyConfig, Box<dyn std::error::Error>> {
    let config = match dotenvy::var("WEATHERLY_CONFIG_PATH") {
        Ok(config_path) => {
            let config_file = File::open(config_path)?;
            serde_json::from_reader(config_file)?
        }
        Err(_) => serde_json::from_str("{}")?,
    };
    Ok(config)
}

pub fn init() -> Result<models::state::WeatherlyState, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    let config = load_config()?;
    if !config.upstream.has_credential() {
        warn!("no weather service API key configured, weather requests will fail");
    }
    let state = models::state::WeatherlyState::new(config)?;
    info!(
        "running in {} mode, API under http://{}/api",
        state.server_config.environment, state.server_config.bind_addr
    );
    Ok(state)
}

/// Build the full application router: API routes under `/api`, Swagger UI,
/// a JSON 404 fallback, CORS, panic recovery and request tracing.
pub fn app(state: models::state::WeatherlyState) -> Router {
    let environment = state.server_config.environment;
    let cors = cors_layer(&state.server_config.allowed_origins);
    let openapi_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/health", routes::health::router(state.clone()))
        .nest("/api/weather", routes::weather::router(state));
    let (router, api) = openapi_router.split_for_parts();
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .fallback(routes::route_not_found)
        .layer(cors)
        .layer(CatchPanicLayer::custom(error::panic_handler(environment)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(origin) => Some(origin),
            Err(err) => {
                warn!("ignoring CORS origin {origin:?}: {err}");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new().allow_methods([Method::GET]);
    if origins.is_empty() {
        cors.allow_origin(AllowOrigin::any()).allow_headers(Any)
    } else {
        // Credentials can't be combined with wildcards.
        cors.allow_origin(AllowOrigin::list(origins))
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    }
}
