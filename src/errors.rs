use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::database::models::ValidationError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "price, pizza_id and restaurant_id are required";
pub const VALIDATION_ERRORS_MESSAGE: &str = "validation errors";

/// Error body shapes exposed to clients: `{"error": ".."}` or `{"errors": [..]}`.
#[derive(Serialize, ToSchema, Debug, PartialEq)]
#[serde(untagged)]
pub enum ErrorResponse {
    Single { error: String },
    Many { errors: Vec<String> },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbError(#[from] DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Rejected write. The reason is logged, never sent to the client.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DbError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl AppError {
    pub fn body(&self) -> ErrorResponse {
        match self {
            AppError::DbError(e) => {
                log::error!("Database error: {}", e);
                ErrorResponse::Single {
                    error: "Internal server error".to_string(),
                }
            }
            AppError::NotFound(message) => ErrorResponse::Single {
                error: message.clone(),
            },
            AppError::BadRequest(message) => ErrorResponse::Many {
                errors: vec![message.clone()],
            },
            AppError::Validation(_) => ErrorResponse::Many {
                errors: vec![VALIDATION_ERRORS_MESSAGE.to_string()],
            },
        }
    }

    pub fn restaurant_not_found() -> Self {
        AppError::NotFound("Restaurant not found".to_string())
    }

    pub fn pizza_not_found() -> Self {
        AppError::NotFound("Pizza not found".to_string())
    }
}

/// Maps unreadable JSON bodies onto the coarse validation response.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON payload on {}: {}", req.path(), err);
    AppError::Validation(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_single_error_shape() {
        let err = AppError::restaurant_not_found();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            serde_json::json!({ "error": "Restaurant not found" })
        );
    }

    #[test]
    fn validation_reason_is_not_surfaced() {
        let err = AppError::from(ValidationError::PriceOutOfRange(31));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            serde_json::json!({ "errors": ["validation errors"] })
        );
    }

    #[test]
    fn bad_request_lists_message() {
        let err = AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string());
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            serde_json::json!({ "errors": [REQUIRED_FIELDS_MESSAGE] })
        );
    }
}
