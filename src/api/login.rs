use super::AppState;
use crate::auth::LoginResult;
use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /v1/login`. Always 200 for a well-formed body; the outcome is in
/// `success`.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResult>, AppError> {
    let Json(request) = payload?;
    let result = state
        .checker
        .login(&request.username, &request.password)
        .await;
    Ok(Json(result))
}
