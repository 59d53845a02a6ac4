use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Role;
use crate::database::models::NewAccount;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

impl SignupRequest {
    fn into_account(self, role: Role) -> NewAccount {
        NewAccount {
            name: self.name,
            email: self.email,
            password: self.password,
            role,
        }
    }
}

/// POST /api/staff/signup - Self-register a staff account
///
/// Any `role` in the body is ignored; the account is always `staff`.
pub async fn staff_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let email = payload.email.trim().to_string();
    let id = state.accounts.register(payload.into_account(Role::Staff)).await?;

    Ok(ApiResponse::created(json!({
        "message": "staff added successfully",
        "id": id,
        "email": email,
        "role": Role::Staff,
    })))
}

/// POST /api/admin/signup - Self-register an admin account
///
/// The body must carry `"role": "admin"`. The route can be switched off with
/// `SECURITY_ALLOW_ADMIN_SIGNUP=false`.
///
/// Expected Output (Success):
/// ```json
/// { "success": true, "data": { "token": "eyJhbGciOiJIUzI1NiI...", "id": 3 } }
/// ```
pub async fn admin_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Value> {
    if !state.config.security.allow_admin_signup {
        tracing::warn!("Rejected admin self-signup: disabled by configuration");
        return Err(ApiError::forbidden("Admin signup is disabled"));
    }

    let Json(payload) = payload?;
    if payload.role.as_deref() != Some(Role::Admin.as_str()) {
        return Err(ApiError::bad_request("Invalid role"));
    }

    let id = state.accounts.register(payload.into_account(Role::Admin)).await?;
    let token = state.tokens.issue(id, Role::Admin)?;

    Ok(ApiResponse::created(json!({ "token": token, "id": id })))
}
