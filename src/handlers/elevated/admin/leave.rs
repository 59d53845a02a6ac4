use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Decision, LeaveApplication, LeaveWithOwner};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::staff::EmailRequest;

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub status: String,
}

/// GET /users/admin/leaveApplications - All applications with owner name and email
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<LeaveWithOwner>> {
    let applications = state.leave.list_all().await?;
    Ok(ApiResponse::success(applications))
}

/// PUT /users/admin/leaveApplications/:id - Decide one application
///
/// Expected Input:
/// ```json
/// { "status": "approved" }
/// ```
pub async fn decide(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> ApiResult<LeaveApplication> {
    let Json(payload) = payload?;
    if payload.status.trim().is_empty() {
        return Err(ApiError::missing_field("status"));
    }
    let decision: Decision = payload.status.parse().map_err(ApiError::bad_request)?;

    let application = state.leave.decide(id, decision).await?;
    Ok(ApiResponse::success(application))
}

/// PUT /users/admin/LeaveApplication/approve - Approve every application of one staff member
pub async fn approve_by_email(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    decide_by_email(&state, &payload.email, Decision::Approved).await
}

/// PUT /users/admin/LeaveApplication/reject - Reject every application of one staff member
pub async fn reject_by_email(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    decide_by_email(&state, &payload.email, Decision::Rejected).await
}

async fn decide_by_email(state: &AppState, email: &str, decision: Decision) -> ApiResult<Value> {
    let updated = state.leave.decide_for_staff(email, decision).await?;
    let message = match decision {
        Decision::Approved => "Leave approved",
        Decision::Rejected => "Leave rejected",
    };

    Ok(ApiResponse::success(json!({
        "message": message,
        "updated": updated,
    })))
}
