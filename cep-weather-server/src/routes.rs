use axum::{
    Router,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use cep_weather_core::{ErrorKind, ErrorResponse, WeatherError, WeatherService};
use serde::Serialize;

const JSON_UTF8: &str = "application/json; charset=utf-8";

pub fn routes(service: WeatherService) -> Router {
    Router::new()
        .route("/weather/{cep}", get(get_weather))
        .with_state(service)
}

async fn get_weather(
    State(service): State<WeatherService>,
    cep: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    // A segment that does not decode to UTF-8 can't be 8 digits either.
    let Path(cep) = cep.map_err(|rejection| ApiError {
        cep: rejection.body_text(),
        err: WeatherError::InvalidFormat,
    })?;
    let weather = service.get_weather(&cep).await.map_err(|err| ApiError { cep, err })?;
    Ok(json_response(StatusCode::OK, &weather))
}

/// Serialize `body` with an explicit UTF-8 JSON content type.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, JSON_UTF8)], bytes).into_response(),
        Err(err) => {
            log::error!("Failed to serialize response body: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, JSON_UTF8)],
                r#"{"message":"internal server error"}"#,
            )
                .into_response()
        }
    }
}

pub struct ApiError {
    cep: String,
    err: WeatherError,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.err.kind() {
            ErrorKind::InvalidFormat => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Error from service for CEP {}: {}", self.cep, self.err);
        } else {
            log::info!("Error from service for CEP {}: {}", self.cep, self.err);
        }
        log::debug!(
            "Returning error: status={}, message={}",
            status.as_u16(),
            self.err.client_message()
        );

        json_response(status, &ErrorResponse::from(&self.err))
    }
}
