use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::endpoint,
    error::{Result, WeatherError},
    model::{LocalityLookupResult, PostalCode},
};

use super::{LocalityResolver, truncate_body};

/// [`LocalityResolver`] backed by the ViaCEP lookup service.
#[derive(Debug, Clone)]
pub struct ViaCepResolver {
    base_url: String,
    http: Client,
}

impl ViaCepResolver {
    pub fn new(http: Client, base_url: String) -> Self {
        Self { base_url, http }
    }

    async fn lookup(&self, postal_code: &PostalCode) -> anyhow::Result<LocalityLookupResult> {
        let url = endpoint(&self.base_url, &format!("ws/{postal_code}/json/"));
        log::debug!("ViaCEP request URL: {url}");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to ViaCEP")?;

        // The status is not checked: ViaCEP answers unknown codes with 200 and
        // an error flag, and anything else fails to decode below.
        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read ViaCEP response body")?;
        log::debug!("ViaCEP response status {status}: {}", truncate_body(&body));

        let parsed: ViaCepResponse =
            serde_json::from_str(&body).context("Failed to parse ViaCEP JSON")?;

        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    erro: Option<ErroFlag>,
}

/// ViaCEP has sent the flag both as `"true"` and as `true`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErroFlag {
    Bool(bool),
    Text(String),
}

impl ErroFlag {
    fn is_set(&self) -> bool {
        match self {
            ErroFlag::Bool(b) => *b,
            ErroFlag::Text(s) => s == "true",
        }
    }
}

impl From<ViaCepResponse> for LocalityLookupResult {
    fn from(resp: ViaCepResponse) -> Self {
        let found = !resp.erro.as_ref().is_some_and(ErroFlag::is_set);
        Self {
            locality_name: resp.localidade,
            found,
        }
    }
}

#[async_trait]
impl LocalityResolver for ViaCepResolver {
    async fn resolve(&self, postal_code: &PostalCode) -> Result<String> {
        let result = self
            .lookup(postal_code)
            .await
            .map_err(WeatherError::Transport)?;

        if !result.found {
            log::info!("CEP {postal_code} not found");
        }

        result.into_locality()
    }
}
