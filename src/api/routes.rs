//! API route configuration.

use crate::api::handlers::{not_found_handler, weather_by_path_handler, weather_by_query_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Weather lookup routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /weather/{city}`     - Weather for a city in the path
/// - `GET /weather?city={city}` - Weather for a city in the query string
///
/// Other methods on these paths answer `404 {"error": "Route not found"}`.
pub fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_by_query_handler))
        .route("/weather/{city}", get(weather_by_path_handler))
        .method_not_allowed_fallback(not_found_handler)
}
