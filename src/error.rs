use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::forms::FieldError;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A database pool error.
    #[error("Database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// A database error.
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// A pool construction error.
    #[error("Pool construction error: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    /// A Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A password hashing error.
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// A row was missing an expected column.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// One or more form fields failed validation.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!("Validation failed: {} field error(s)", errors.len());
                #[derive(serde::Serialize)]
                struct ErrorsBody<'a> {
                    errors: &'a [FieldError],
                }
                let body = sonic_rs::to_string(&ErrorsBody { errors: &errors })
                    .unwrap_or_else(|_| r#"{"errors":[]}"#.to_string());
                (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response()
            }

            AppError::Pool(ref e) => {
                tracing::error!("Database pool error: {}", e);
                generic_500()
            }

            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                generic_500()
            }

            AppError::CreatePool(ref e) => {
                tracing::error!("Pool construction error: {}", e);
                generic_500()
            }

            AppError::Redis(ref e) => {
                tracing::error!("Redis error: {}", e);
                generic_500()
            }

            AppError::Hashing(ref msg) => {
                tracing::error!("Hashing error: {}", msg);
                generic_500()
            }

            AppError::MissingData(ref col) => {
                tracing::error!("Missing data in row: {}", col);
                generic_500()
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                generic_500()
            }
        }
    }
}

/// Infrastructure failures all collapse to the same opaque response.
fn generic_500() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}
