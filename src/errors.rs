use actix_web::{error, error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::models::{ErrorResponse, RequestError};

/// Client-facing API errors, rendered as `ErrorResponse` JSON
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
}

impl ApiError {
    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) | ApiError::InvalidRequest(RequestError::Malformed) => {
                "invalid_json"
            }
            ApiError::InvalidRequest(RequestError::MissingKeys(_)) => "missing_keys",
            ApiError::InvalidRequest(_) => "invalid_field",
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_response_body())
    }
}

/// Map body extraction failures onto `ApiError::InvalidJson`
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}
