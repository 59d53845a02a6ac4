use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::AnnouncementFeed;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    #[serde(default)]
    pub suggestion: String,
}

/// POST /users/staff/suggestions - Drop an anonymous note in the suggestion box
///
/// The submitter is authenticated but not recorded.
pub async fn suggest(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let suggestion = state.channel.submit_suggestion(&payload.suggestion, Utc::now()).await?;

    Ok(ApiResponse::created(json!({
        "message": "Suggestion submitted",
        "id": suggestion.id,
    })))
}

/// GET /users/staff/announcements - Announcements split into `recent` (last 7 days) and `old`
pub async fn announcements(State(state): State<AppState>) -> ApiResult<AnnouncementFeed> {
    let feed = state.channel.feed(Utc::now()).await?;
    Ok(ApiResponse::success(feed))
}
