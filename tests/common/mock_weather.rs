//! Mock Weather Gateway for Testing
//!
//! Returns canned temperatures per place name and records every query.

use async_trait::async_trait;
use poppytalk::weather::{GatewayError, WeatherGateway};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct MockWeather {
    /// Place name -> temperature; unknown places fail with a network error
    pub readings: HashMap<String, f64>,
    /// Every place name queried
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl MockWeather {
    pub fn new(readings: &[(&str, f64)]) -> Self {
        Self {
            readings: readings
                .iter()
                .map(|(place, temp)| (place.to_string(), *temp))
                .collect(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A gateway with no readings at all, like a device with no network
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn get_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherGateway for MockWeather {
    async fn fetch_temperature_f(&self, place: &str) -> Result<f64, GatewayError> {
        self.queries.lock().unwrap().push(place.to_string());
        self.readings
            .get(place)
            .copied()
            .ok_or_else(|| GatewayError::Network(format!("no route to {}", place)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
