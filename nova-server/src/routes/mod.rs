pub mod calendar;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nova_core::NovaError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned by handlers, mapped to a status code and a JSON body
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Nova(NovaError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Nova(e) => match e {
                NovaError::InvalidEvent(_) => StatusCode::BAD_REQUEST,
                NovaError::EventNotFound(_) => StatusCode::NOT_FOUND,
                NovaError::ReadOnlyEvent(_) => StatusCode::FORBIDDEN,
                NovaError::Fetch(_) | NovaError::IcsParse(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(message) => message,
            AppError::Nova(e) => e.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{}", message);
        } else {
            tracing::debug!(%status, "{}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<NovaError> for AppError {
    fn from(err: NovaError) -> Self {
        AppError::Nova(err)
    }
}
