use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::database::models::AccountProfile;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AccountProfile,
}

/// POST /api/staff/login - Authenticate any account and receive a session token
///
/// Expected Input:
/// ```json
/// { "email": "ama@school.edu", "password": "secret" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiI...",
///     "user": { "id": 1, "name": "Ama", "email": "ama@school.edu", "role": "staff", ... }
///   }
/// }
/// ```
pub async fn staff_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload?;
    login(&state, payload, None).await
}

/// POST /api/admin/login - Same as staff login, restricted to admin accounts
pub async fn admin_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload?;
    login(&state, payload, Some(Role::Admin)).await
}

async fn login(state: &AppState, payload: LoginRequest, required: Option<Role>) -> ApiResult<LoginResponse> {
    let user = state
        .accounts
        .authenticate(&payload.email, &payload.password, required)
        .await?;
    let token = state.tokens.issue(user.id, user.role)?;

    tracing::info!("Account {} ({}) logged in", user.id, user.role);
    Ok(ApiResponse::success(LoginResponse { token, user }))
}
