use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::schemas::ErrorResponse;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Malformed request body: {0}")]
    Malformed(String),

    #[error("Price of dish `{dish}` must be a finite number")]
    NonFinitePrice { dish: String },

    #[error("Price of dish `{dish}` must not be negative, got {price}")]
    NegativePrice { dish: String, price: f64 },

    #[error("Bill total is too large")]
    TotalOverflow,
}

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Bill {0} not found")]
    NotFound(String),

    #[error("Bill store lock poisoned")]
    Poisoned,
}

/// Errors as seen by an HTTP client.
#[derive(Error, Debug)]
pub enum ApiError {
    // Answered as `{ success: false, error }`
    #[error("{0}")]
    BadRequest(String),

    #[error("Bill not found")]
    BillNotFound,

    #[error("{0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::BillNotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BillNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(message) => HttpResponse::BadRequest().json(ErrorResponse {
                success: false,
                error: message.clone(),
            }),
            other => HttpResponse::build(other.status_code())
                .content_type(ContentType::plaintext())
                .body(other.to_string()),
        }
    }
}
