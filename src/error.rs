use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::mail::DeliveryError;
use crate::models::MessageResponse;

pub const VALIDATION_MESSAGE: &str = "Email and message cannot be empty.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";
pub const FORBIDDEN_ORIGIN_MESSAGE: &str =
    "The CORS policy for this site does not allow access from the specified Origin.";
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Origin not allowed: {0}")]
    ForbiddenOrigin(String),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl IntoResponse for AppError {
    // Only validation messages reach the caller verbatim; everything else is generic.
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidBody(_) => {
                (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE.to_string())
            }
            AppError::ForbiddenOrigin(_) => {
                (StatusCode::FORBIDDEN, FORBIDDEN_ORIGIN_MESSAGE.to_string())
            }
            AppError::Delivery(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                DELIVERY_FAILED_MESSAGE.to_string(),
            ),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidBody(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
