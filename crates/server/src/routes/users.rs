use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use common::types::Message;
use models::validation::UserCandidate;
use serde::Serialize;
use serde_json::Value;
use service::users::domain::User;
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedOutput {
    pub message: &'static str,
    pub user: User,
}

pub async fn welcome(State(state): State<AppState>) -> Json<Message> {
    Json(Message::new(state.profile.welcome))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let profile = state.profile;
    let users = state
        .users
        .list()
        .await
        .map_err(|e| ApiError::from_service(e, profile.invalid, profile.list_failed))?;
    info!(count = users.len(), "list users");
    Ok(Json(users))
}

/// Body is read raw: anything that is not a JSON object becomes an empty
/// submission and fails validation with a 400 instead of a framework rejection.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedOutput>), ApiError> {
    let profile = state.profile;
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let candidate = UserCandidate::from_json(&body);
    let user = state
        .users
        .create(candidate)
        .await
        .map_err(|e| ApiError::from_service(e, profile.invalid, profile.create_failed))?;
    Ok((StatusCode::CREATED, Json(CreatedOutput { message: profile.created, user })))
}
