use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::database::models::{AccountProfile, ProfileUpdate};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /users/staff/profile - The caller's own profile
pub async fn get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<AccountProfile> {
    let profile = state.accounts.profile(user.id).await?;
    Ok(ApiResponse::success(profile))
}

/// PUT /users/staff/profile - Partial profile edit
///
/// Absent fields keep their stored value. `password` is re-hashed when given;
/// role cannot be changed here.
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(update) = payload?;
    let profile = state.accounts.update_profile(user.id, update).await?;

    Ok(ApiResponse::success(json!({
        "message": "Profile updated",
        "profile": profile,
    })))
}

/// DELETE /users/staff/profile - Remove the caller's account and everything it owns
pub async fn delete(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    let deleted = state.accounts.delete_account(user.id).await?;

    Ok(ApiResponse::success(json!({
        "message": "Profile deleted",
        "deleted": deleted,
    })))
}
