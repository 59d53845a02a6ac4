use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::PortalStats;
use crate::state::AppState;

/// GET /users/admin/stats - Dashboard counts
pub async fn get(State(state): State<AppState>) -> ApiResult<PortalStats> {
    let stats = state.stats.stats().await?;
    Ok(ApiResponse::success(stats))
}
