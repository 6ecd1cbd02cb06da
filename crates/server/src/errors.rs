use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Request-scoped failure, rendered as a JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with every violated rule.
    Validation { message: &'static str, errors: Vec<String> },
    /// 500 with the storage detail.
    Storage { message: &'static str, error: String },
}

impl ApiError {
    /// Map a service failure; `invalid` and `failed` are the summaries used
    /// for the 400 and 500 bodies respectively.
    pub fn from_service(e: ServiceError, invalid: &'static str, failed: &'static str) -> Self {
        match e {
            ServiceError::Validation(errors) => ApiError::Validation { message: invalid, errors },
            ServiceError::Storage(error) => ApiError::Storage { message: failed, error },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, Json(json!({"message": message, "errors": errors}))).into_response()
            }
            ApiError::Storage { message, error } => {
                error!(error = %error, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": message, "error": error}))).into_response()
            }
        }
    }
}

/// Failures before the listener is serving. All of them are fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot connect to database: {0}")]
    Connect(String),
    #[error("cannot apply migrations: {0}")]
    Migrate(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
