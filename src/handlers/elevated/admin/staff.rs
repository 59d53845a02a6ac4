use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::password::generate_temporary_password;
use crate::auth::Role;
use crate::database::models::{AccountProfile, NewAccount};
use crate::middleware::{ApiResponse, ApiResult};
use crate::notify::WelcomeMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddStaffRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddStaffResponse {
    pub message: String,
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub notification_sent: bool,
    /// Only present when the generated password could not be delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub email: String,
}

/// POST /users/admin/addStaff - Create an account on someone's behalf
///
/// `role` defaults to `staff`. Without a `password` a 12-character temporary
/// one is generated and mailed through the notification sink. If delivery
/// fails the account is kept and the password is returned instead.
///
/// Expected Output (delivery failed):
/// ```json
/// {
///   "success": true,
///   "data": {
///     "message": "Staff account created",
///     "id": 4,
///     "email": "jane@x.com",
///     "role": "staff",
///     "notification_sent": false,
///     "temporary_password": "aB3dE5gH7jK9"
///   }
/// }
/// ```
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<AddStaffRequest>, JsonRejection>,
) -> ApiResult<AddStaffResponse> {
    let Json(payload) = payload?;

    let role = match payload.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        Some(role) => role.parse::<Role>()?,
        None => Role::Staff,
    };

    let (password, generated) = match payload.password.filter(|p| !p.is_empty()) {
        Some(password) => (password, false),
        None => (generate_temporary_password(), true),
    };

    let email = payload.email.trim().to_string();
    let name = payload.name.trim().to_string();

    let id = state
        .accounts
        .register(NewAccount {
            name: name.clone(),
            email: email.clone(),
            password: password.clone(),
            role,
        })
        .await?;

    let message = WelcomeMessage {
        to: email.clone(),
        name: if name.is_empty() { email.clone() } else { name },
        password: password.clone(),
        school_name: state.config.notify.school_name.clone(),
    };

    let notification_sent = match state.notifier.send_welcome(&message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Welcome notification for {} not delivered: {}", email, e);
            false
        }
    };

    Ok(ApiResponse::created(AddStaffResponse {
        message: "Staff account created".to_string(),
        id,
        email,
        role,
        notification_sent,
        temporary_password: (generated && !notification_sent).then_some(password),
    }))
}

/// GET /users/admin/staffProfiles - Every account's public profile
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<AccountProfile>> {
    let profiles = state.accounts.list_profiles().await?;
    Ok(ApiResponse::success(profiles))
}

/// GET /users/admin/staffProfiles/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<AccountProfile> {
    let profile = state.accounts.profile(id).await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /users/admin/delete - Remove an account (and everything it owns) by email
pub async fn delete(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let deleted = state.accounts.delete_by_email(&payload.email).await?;

    Ok(ApiResponse::success(json!({
        "message": "Staff and related data deleted",
        "deleted": deleted,
    })))
}
