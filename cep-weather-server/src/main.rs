//! Binary crate for the `cep-weather-server` HTTP service.
//!
//! This crate focuses on:
//! - Loading configuration from `.env`, environment and flags
//! - Routing `GET /weather/{cep}`
//! - Translating service errors into HTTP status codes

use std::path::Path;

use anyhow::Context;
use cep_weather_core::WeatherService;
use clap::Parser;

mod cli;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = Path::new(".env");
    let dotenv_loaded = cli::load_dotenv(env_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if dotenv_loaded {
        log::debug!("loaded environment from {}", env_file.display());
    } else {
        log::debug!("no {} file, using process environment only", env_file.display());
    }

    let args = cli::Cli::parse();
    let config = args.config()?;
    log::debug!("{config:?}");

    let service = WeatherService::from_config(&config).context("Failed to build weather service")?;
    let app = routes::routes(service);

    let addr = args.listen_addr();
    log::info!("Server running on {addr}");
    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .context("Server failed")?;

    Ok(())
}
