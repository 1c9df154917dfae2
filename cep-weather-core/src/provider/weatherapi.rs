use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::endpoint,
    error::{Result, WeatherError},
    model::TemperatureReading,
};

use super::{TemperatureFetcher, truncate_body};

/// [`TemperatureFetcher`] backed by WeatherAPI.com's current conditions endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiFetcher {
    base_url: String,
    api_key: String,
    http: Client,
}

impl WeatherApiFetcher {
    pub fn new(http: Client, base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorResponse {
    error: WaErrorDetail,
}

/// Prefer the service's own error message; fall back to the raw body.
fn upstream_error(status: u16, body: &str) -> WeatherError {
    let message = serde_json::from_str::<WaErrorResponse>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty());

    match message {
        Some(message) => {
            log::warn!("WeatherAPI error response ({status}): {message}");
            WeatherError::UpstreamError { status, message }
        }
        None => {
            log::warn!("WeatherAPI returned unexpected status {status}");
            WeatherError::UpstreamError {
                status,
                message: truncate_body(body),
            }
        }
    }
}

#[async_trait]
impl TemperatureFetcher for WeatherApiFetcher {
    async fn fetch(&self, locality: &str) -> Result<TemperatureReading> {
        let url = endpoint(&self.base_url, "v1/current.json");
        log::debug!("WeatherAPI request: {url} q={locality}");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", locality)])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (current)")
            .map_err(WeatherError::Transport)?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read WeatherAPI current response body")
            .map_err(WeatherError::Transport)?;
        log::debug!("WeatherAPI response status {status}: {}", truncate_body(&body));

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &body));
        }

        let parsed: WaResponse = serde_json::from_str(&body)
            .context("Failed to parse WeatherAPI current JSON")
            .map_err(WeatherError::Transport)?;

        Ok(TemperatureReading {
            celsius: parsed.current.temp_c,
        })
    }
}
