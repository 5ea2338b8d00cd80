//! DTOs for the weather lookup endpoint.

use serde::Deserialize;

/// Query parameters for `GET /api/weather?city=...`.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}
