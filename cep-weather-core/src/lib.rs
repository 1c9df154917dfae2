//! Core library for the `cep-weather` service.
//!
//! This crate defines:
//! - Configuration for the upstream services
//! - Clients for the postal code lookup and weather services
//! - The orchestration that turns a postal code into three temperatures
//!
//! It is used by `cep-weather-server`, but carries no HTTP server concerns itself.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use model::{ErrorResponse, LocalityLookupResult, PostalCode, TemperatureReading, WeatherResponse};
pub use provider::{LocalityResolver, TemperatureFetcher};
pub use service::WeatherService;
