use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient points. Balance: {balance}, Requested: {requested}")]
    InsufficientPoints { balance: i64, requested: i64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_)
            | AppError::InvalidAmount(_)
            | AppError::InsufficientPoints { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "internal_error",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidAmount(_) => "invalid_amount",
            AppError::InsufficientPoints { .. } => "insufficient_points",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = json!({
            "error": self.to_string(),
            "code": self.code(),
        });

        // Insufficient-funds responses carry the balance at failure time so
        // callers can retry with a smaller request.
        if let AppError::InsufficientPoints { balance, .. } = &self {
            body["current_balance"] = json!(balance);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status_code() {
        let error = AppError::Validation(ValidationError::new("amount", "must be positive"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "validation_error");
    }

    #[test]
    fn test_invalid_amount_status_code() {
        let error = AppError::InvalidAmount("negative amount".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "invalid_amount");
    }

    #[test]
    fn test_insufficient_points_status_code() {
        let error = AppError::InsufficientPoints {
            balance: 2,
            requested: 5,
        };
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "insufficient_points");
    }

    #[test]
    fn test_insufficient_points_message_carries_context() {
        let error = AppError::InsufficientPoints {
            balance: 2,
            requested: 5,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient points. Balance: 2, Requested: 5"
        );
    }

    #[test]
    fn test_database_error_status_code() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), "internal_error");
    }

    #[test]
    fn test_unauthorized_status_code() {
        let error = AppError::Unauthorized("missing identity".to_string());
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.code(), "unauthorized");
    }

    #[tokio::test]
    async fn test_insufficient_points_response() {
        let error = AppError::InsufficientPoints {
            balance: 0,
            requested: 1,
        };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
