//! OpenWeatherMap current-weather client

use super::{GatewayError, WeatherGateway};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

/// Fetches `main.temp` in imperial units for a `City, CC` query
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    endpoint: String,
    api_key: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("poppytalk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build weather HTTP client")?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            timeout,
            http_client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.weather_endpoint,
            &config.openweather_api_key,
            Duration::from_secs(config.weather_timeout_secs),
        )
    }

    fn request_url(&self, place: &str) -> String {
        format!(
            "{}?q={}&units=imperial&appid={}",
            self.endpoint,
            urlencoding::encode(place),
            urlencoding::encode(&self.api_key)
        )
    }

    fn map_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout)
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

/// Pull the temperature out of a current-weather response body
pub fn parse_temperature(body: &str) -> Result<f64, GatewayError> {
    let weather: CurrentWeather =
        serde_json::from_str(body).map_err(|e| GatewayError::Parse(e.to_string()))?;
    let temp = weather.main.temp;
    if !temp.is_finite() {
        return Err(GatewayError::Parse(format!("temperature is {}", temp)));
    }
    Ok(temp)
}

#[async_trait]
impl WeatherGateway for OpenWeatherClient {
    async fn fetch_temperature_f(&self, place: &str) -> Result<f64, GatewayError> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::MissingApiKey);
        }

        debug!("🌡️ Requesting temperature for '{}'", place);
        let response = self
            .http_client
            .get(self.request_url(place))
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        if !status.is_success() {
            warn!("❌ Weather API error ({}) for '{}'", status, place);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let temp = parse_temperature(&body)?;
        debug!("🌡️ {} is {:.1}°F", place, temp);
        Ok(temp)
    }

    fn name(&self) -> &str {
        "openweathermap"
    }
}
