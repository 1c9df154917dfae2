use std::sync::Arc;

use crate::{
    Config,
    error::{Result, WeatherError},
    model::{PostalCode, WeatherResponse},
    provider::{LocalityResolver, TemperatureFetcher, providers_from_config},
};

/// Validates a postal code, resolves its locality and reads the temperature there.
///
/// Holds no per-request state, so one instance serves any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct WeatherService {
    resolver: Arc<dyn LocalityResolver>,
    fetcher: Arc<dyn TemperatureFetcher>,
}

impl WeatherService {
    pub fn new(resolver: Arc<dyn LocalityResolver>, fetcher: Arc<dyn TemperatureFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (resolver, fetcher) = providers_from_config(config)?;
        Ok(Self::new(resolver, fetcher))
    }

    /// Either all three temperatures or an error; never a partial result.
    pub async fn get_weather(&self, raw_postal_code: &str) -> Result<WeatherResponse> {
        let postal_code = PostalCode::parse(raw_postal_code).inspect_err(|_| {
            log::info!("Invalid CEP: {raw_postal_code:?}");
        })?;

        let locality = match self.resolver.resolve(&postal_code).await {
            Ok(locality) => locality,
            Err(WeatherError::NotFound) => return Err(WeatherError::NotFound),
            Err(err) => {
                log::error!("Error getting location for CEP {postal_code}: {err}");
                return Err(err.into_internal("locality lookup"));
            }
        };

        let reading = self.fetcher.fetch(&locality).await.map_err(|err| {
            log::error!("Error getting weather for location {locality}: {err}");
            err.into_internal("temperature fetch")
        })?;

        Ok(WeatherResponse::from(reading))
    }
}
