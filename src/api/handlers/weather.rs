//! Handlers for weather lookups.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};

use crate::api::dto::weather::WeatherQuery;
use crate::domain::entities::{MissingCity, WeatherLookup};
use crate::error::AppError;
use crate::state::AppState;
use tracing::debug;

/// Response header reporting whether the payload came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Returns current weather for the city in the path.
///
/// # Endpoint
///
/// `GET /api/weather/{city}`
///
/// # Request Flow
///
/// 1. Check cache (key: lower-cased city)
/// 2. On cache hit, return the stored payload
/// 3. On cache miss, call the upstream provider
/// 4. Store the payload with the configured TTL and return it
///
/// # Response Codes
///
/// - **200 OK**: Upstream JSON, verbatim; `x-cache: HIT` or `MISS`
/// - **400 Bad Request**: City is blank or not valid UTF-8 once decoded
/// - **500 Internal Server Error**: Upstream, cache or serialization failure
pub async fn weather_by_path_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(city) = path.map_err(|rejection| {
        debug!("Rejected city path: {}", rejection.body_text());
        AppError::from(MissingCity)
    })?;

    let lookup = state.weather_service.get_weather(Some(&city)).await?;
    Ok(render(lookup))
}

/// Returns current weather for the `city` query parameter.
///
/// # Endpoint
///
/// `GET /api/weather?city={city}`
///
/// Also answers `GET /api/weather` and `GET /api/weather/`, which fail with
/// **400 Bad Request** `{"error": "City is required"}`, as does a query
/// string that cannot be parsed (for example a repeated `city`).
///
/// See [`weather_by_path_handler`] for the lookup flow.
pub async fn weather_by_query_handler(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|rejection| {
        debug!("Rejected weather query: {}", rejection.body_text());
        AppError::from(MissingCity)
    })?;

    let lookup = state
        .weather_service
        .get_weather(query.city.as_deref())
        .await?;
    Ok(render(lookup))
}

fn render(lookup: WeatherLookup) -> Response {
    (
        [(CACHE_STATUS_HEADER, lookup.cache_status.as_header_value())],
        Json(lookup.payload.into_value()),
    )
        .into_response()
}
