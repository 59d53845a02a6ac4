use axum::extract::State;

use crate::database::models::{MaterialWithOwner, TopicLogWithOwner};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users/admin/viewTLMs - Uploaded materials, newest first. 404 when there are none.
pub async fn materials(State(state): State<AppState>) -> ApiResult<Vec<MaterialWithOwner>> {
    let materials = state.submissions.list_materials().await?;
    Ok(ApiResponse::success(materials))
}

/// GET /users/admin/viewTALMs - Topic logs, newest first. 404 when there are none.
pub async fn topic_logs(State(state): State<AppState>) -> ApiResult<Vec<TopicLogWithOwner>> {
    let logs = state.submissions.list_topic_logs().await?;
    Ok(ApiResponse::success(logs))
}
