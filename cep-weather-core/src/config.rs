use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, Url};
use std::time::Duration;

pub const DEFAULT_LOCALITY_BASE_URL: &str = "https://viacep.com.br";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("cep-weather/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the upstream clients. Loaded once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub weather_api_key: String,
    pub locality_base_url: String,
    pub weather_base_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

// The API key stays out of `{:?}` output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("weather_api_key", &"<redacted>")
            .field("locality_base_url", &self.locality_base_url)
            .field("weather_base_url", &self.weather_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    pub fn new(weather_api_key: impl Into<String>) -> Self {
        Self {
            weather_api_key: weather_api_key.into(),
            locality_base_url: DEFAULT_LOCALITY_BASE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn with_locality_base_url(mut self, url: impl Into<String>) -> Self {
        self.locality_base_url = url.into();
        self
    }

    pub fn with_weather_base_url(mut self, url: impl Into<String>) -> Self {
        self.weather_base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.weather_api_key.trim().is_empty() {
            bail!(
                "No WeatherAPI key configured.\n\
                 Hint: set WEATHER_API_KEY in the environment or in a .env file."
            );
        }

        if self.request_timeout.is_zero() {
            bail!("Request timeout must be greater than zero");
        }

        parse_base_url(&self.locality_base_url).context("Invalid locality lookup base URL")?;
        parse_base_url(&self.weather_base_url).context("Invalid weather service base URL")?;

        Ok(())
    }

    /// Build the HTTP client both upstream clients share.
    pub fn http_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("'{raw}' is not a valid URL"))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("Unsupported URL scheme '{other}' in '{raw}'")),
    }
}

/// Join `path` onto a base URL, tolerating a trailing slash on the base.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
