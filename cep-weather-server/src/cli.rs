use std::{net::SocketAddr, path::Path, time::Duration};

use anyhow::Context;
use cep_weather_core::{
    Config,
    config::{DEFAULT_LOCALITY_BASE_URL, DEFAULT_WEATHER_BASE_URL},
};
use clap::Parser;

/// Top-level CLI struct. Every flag falls back to an environment variable,
/// which may come from a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "cep-weather-server", version, about = "Current temperature by Brazilian postal code")]
pub struct Cli {
    /// API key for WeatherAPI.com.
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: String,

    /// TCP port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the postal code lookup service.
    #[arg(long, env = "LOCALITY_API_URL", default_value = DEFAULT_LOCALITY_BASE_URL)]
    pub locality_api_url: String,

    /// Base URL of the weather service.
    #[arg(long, env = "WEATHER_API_URL", default_value = DEFAULT_WEATHER_BASE_URL)]
    pub weather_api_url: String,

    /// Timeout in seconds applied to each upstream request.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        let config = Config::new(self.weather_api_key.clone())
            .with_locality_base_url(self.locality_api_url.clone())
            .with_weather_base_url(self.weather_api_url.clone())
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs));

        config.validate().context("Failed to load config")?;
        Ok(config)
    }
}

/// Load `path` into the process environment. Variables already set win.
/// Returns whether the file existed; a missing file is fine, real deployments
/// often set only environment variables.
///
/// Runs before the logger is set up so `RUST_LOG` may come from the file.
pub fn load_dotenv(path: &Path) -> anyhow::Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read env file: {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "cep-weather-server",
            "--weather-api-key",
            "KEY",
            "--port",
            "9090",
            "--locality-api-url",
            "http://localhost:1234",
            "--weather-api-url",
            "http://localhost:5678",
            "--request-timeout-secs",
            "3",
        ])
        .expect("valid args");

        assert_eq!(cli.listen_addr().port(), 9090);

        let config = cli.config().expect("valid config");
        assert_eq!(config.weather_api_key, "KEY");
        assert_eq!(config.locality_base_url, "http://localhost:1234");
        assert_eq!(config.weather_base_url, "http://localhost:5678");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let res = Cli::try_parse_from(["cep-weather-server", "--weather-api-key", "KEY", "--port", "http"]);
        assert!(res.is_err());
    }

    #[test]
    fn config_fails_on_empty_api_key() {
        let cli = Cli::try_parse_from(["cep-weather-server", "--weather-api-key", ""]).expect("valid args");
        let err = cli.config().unwrap_err();
        assert!(format!("{err:#}").contains("No WeatherAPI key configured"));
    }

    #[test]
    fn missing_dotenv_file_is_tolerated() {
        let loaded = load_dotenv(Path::new("/nonexistent/cep-weather/.env")).expect("tolerated");
        assert!(!loaded);
    }

    #[test]
    fn dotenv_file_populates_environment() {
        let path = std::env::temp_dir().join(format!("cep-weather-{}.env", std::process::id()));
        std::fs::write(&path, "CEP_WEATHER_DOTENV_TEST_LOG=debug\n").expect("write env file");

        let loaded = load_dotenv(&path).expect("valid env file");
        let value = std::env::var("CEP_WEATHER_DOTENV_TEST_LOG");
        let _ = std::fs::remove_file(&path);

        assert!(loaded);
        assert_eq!(value.as_deref(), Ok("debug"));
    }
}
