//! Weather lookup
//!
//! The phrase builder only ever needs one number: the current temperature in
//! Fahrenheit for a place name. Every way that lookup can go wrong is a
//! [`GatewayError`], and callers treat all of them the same.

pub mod openweather;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use openweather::OpenWeatherClient;

/// Failure to obtain a temperature reading
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("weather API key is not configured")]
    MissingApiKey,

    #[error("weather request timed out after {0:?}")]
    Timeout(Duration),

    #[error("weather request failed: {0}")]
    Network(String),

    #[error("weather service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed weather response: {0}")]
    Parse(String),
}

/// Trait for temperature sources
#[async_trait]
pub trait WeatherGateway: Send + Sync + std::fmt::Debug {
    /// Current temperature in degrees Fahrenheit for `place`, e.g. "Ocean City, US"
    async fn fetch_temperature_f(&self, place: &str) -> Result<f64, GatewayError>;

    /// Get the gateway name
    fn name(&self) -> &str;
}
