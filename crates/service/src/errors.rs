use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Submitted fields broke one or more rules; every message is kept.
    #[error("validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msgs) => ServiceError::Validation(msgs),
            ModelError::Db(msg) => ServiceError::Storage(msg),
        }
    }
}
