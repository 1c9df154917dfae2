use thiserror::Error;

/// Fieldless discriminant of [`WeatherError`], convenient for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFormat,
    NotFound,
    Transport,
    Upstream,
    Internal,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    /// Postal code is not exactly 8 ASCII digits.
    #[error("invalid zipcode")]
    InvalidFormat,

    /// The lookup service has no locality for a well-formed postal code.
    #[error("can not find zipcode")]
    NotFound,

    /// Request could not be sent, or a response body could not be read or decoded.
    #[error("transport failure: {0:#}")]
    Transport(anyhow::Error),

    /// The weather service answered with a non-success status.
    #[error("upstream returned status {status}: {message}")]
    UpstreamError { status: u16, message: String },

    /// Any failure past validation that is not a "not found".
    #[error("{stage} failed: {cause}")]
    Internal {
        stage: &'static str,
        cause: Box<WeatherError>,
    },
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::InvalidFormat => ErrorKind::InvalidFormat,
            WeatherError::NotFound => ErrorKind::NotFound,
            WeatherError::Transport(_) => ErrorKind::Transport,
            WeatherError::UpstreamError { .. } => ErrorKind::Upstream,
            WeatherError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Wrap `self` as an [`WeatherError::Internal`] failure of `stage`.
    pub fn into_internal(self, stage: &'static str) -> Self {
        match self {
            internal @ WeatherError::Internal { .. } => internal,
            other => WeatherError::Internal {
                stage,
                cause: Box::new(other),
            },
        }
    }

    /// Text that is safe to show to a client. Upstream detail never leaks here.
    pub fn client_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidFormat => "invalid zipcode",
            ErrorKind::NotFound => "can not find zipcode",
            _ => "internal server error",
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
