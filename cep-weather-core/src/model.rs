use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

// `\d` would also match non-ASCII digits.
static POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{8}$").unwrap_or_else(|err| panic!("postal code pattern: {err}"))
});

/// Brazilian postal code (CEP): exactly 8 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(raw: &str) -> Result<Self> {
        if POSTAL_CODE_RE.is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(WeatherError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PostalCode {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalityLookupResult {
    pub locality_name: String,
    pub found: bool,
}

impl LocalityLookupResult {
    pub fn into_locality(self) -> Result<String> {
        if self.found {
            Ok(self.locality_name)
        } else {
            Err(WeatherError::NotFound)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub celsius: f64,
}

/// Body of a successful `GET /weather/{cep}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherResponse {
    /// Kelvin is `C + 273`, not `C + 273.15`; clients depend on this value.
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            temp_c: celsius,
            temp_f: celsius * 1.8 + 32.0,
            temp_k: celsius + 273.0,
        }
    }
}

impl From<TemperatureReading> for WeatherResponse {
    fn from(reading: TemperatureReading) -> Self {
        Self::from_celsius(reading.celsius)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<&WeatherError> for ErrorResponse {
    fn from(err: &WeatherError) -> Self {
        Self::new(err.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn accepts_eight_ascii_digits() {
        let cep = PostalCode::parse("01001000").expect("valid cep");
        assert_eq!(cep.as_str(), "01001000");
        assert_eq!(cep.to_string(), "01001000");
    }

    #[test]
    fn rejects_malformed_postal_codes() {
        for raw in ["123", "abcdefgh", "123456789", "", "0100100a", "01001-000", " 01001000", "１２３４５６７８"] {
            let err = PostalCode::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "input {raw:?}");
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let cep: PostalCode = "22041001".parse().expect("valid cep");
        assert_eq!(cep, PostalCode::parse("22041001").unwrap());
    }

    #[test]
    fn converts_celsius_exactly() {
        let resp = WeatherResponse::from_celsius(25.0);
        assert_eq!(resp.temp_c, 25.0);
        assert_eq!(resp.temp_f, 77.0);
        assert_eq!(resp.temp_k, 298.0);
    }

    #[test]
    fn converts_negative_and_fractional_celsius() {
        let resp = WeatherResponse::from(TemperatureReading { celsius: -10.5 });
        assert!((resp.temp_f - 13.1).abs() < 1e-9);
        assert!((resp.temp_k - 262.5).abs() < 1e-9);
    }

    #[test]
    fn weather_response_uses_unit_suffixed_keys() {
        let json = serde_json::to_value(WeatherResponse::from_celsius(0.0)).unwrap();
        assert_eq!(json, serde_json::json!({"temp_C": 0.0, "temp_F": 32.0, "temp_K": 273.0}));
    }

    #[test]
    fn lookup_result_not_found() {
        let result = LocalityLookupResult {
            locality_name: String::new(),
            found: false,
        };
        assert_eq!(result.into_locality().unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn error_response_from_error_uses_client_message() {
        let resp = ErrorResponse::from(&WeatherError::NotFound);
        assert_eq!(resp.message, "can not find zipcode");
    }
}
