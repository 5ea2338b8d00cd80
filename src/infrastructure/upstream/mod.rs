//! Upstream weather provider clients.

mod openweather;

pub use openweather::{DEFAULT_ENDPOINT, OpenWeatherClient};
