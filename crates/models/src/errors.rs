use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Every violated schema rule, in field order.
    #[error("validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("database error: {0}")]
    Db(String),
}
