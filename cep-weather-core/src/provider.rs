use crate::{
    Config,
    error::Result,
    model::{PostalCode, TemperatureReading},
    provider::{viacep::ViaCepResolver, weatherapi::WeatherApiFetcher},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod viacep;
pub mod weatherapi;

/// Maps a postal code to a locality name.
#[async_trait]
pub trait LocalityResolver: Send + Sync + Debug {
    /// Returns [`WeatherError::NotFound`](crate::WeatherError::NotFound) when the
    /// lookup service knows no such postal code.
    async fn resolve(&self, postal_code: &PostalCode) -> Result<String>;
}

/// Reads the current temperature for a locality name.
#[async_trait]
pub trait TemperatureFetcher: Send + Sync + Debug {
    async fn fetch(&self, locality: &str) -> Result<TemperatureReading>;
}

/// Construct both upstream clients from config around a single HTTP client.
pub fn providers_from_config(
    config: &Config,
) -> anyhow::Result<(Arc<dyn LocalityResolver>, Arc<dyn TemperatureFetcher>)> {
    config.validate()?;
    let http = config.http_client()?;

    let resolver = ViaCepResolver::new(http.clone(), config.locality_base_url.clone());
    let fetcher = WeatherApiFetcher::new(
        http,
        config.weather_base_url.clone(),
        config.weather_api_key.clone(),
    );

    Ok((Arc::new(resolver), Arc::new(fetcher)))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
