use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::{LeaveApplication, NewLeave};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaveRequest {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// POST /users/staff/leave - File a leave application (starts `pending`)
///
/// Expected Input:
/// ```json
/// { "reason": "Medical", "start_date": "2024-05-01", "end_date": "2024-05-03" }
/// ```
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<LeaveRequest>, JsonRejection>,
) -> ApiResult<LeaveApplication> {
    let Json(payload) = payload?;
    let application = state
        .leave
        .submit(
            user.id,
            NewLeave {
                reason: payload.reason,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;

    Ok(ApiResponse::success(application))
}

/// GET /users/staff/leaveResponce - The caller's applications and their outcomes
pub async fn responses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<LeaveApplication>> {
    let applications = state.leave.list_for_staff(user.id).await?;
    Ok(ApiResponse::success(applications))
}
