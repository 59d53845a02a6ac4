use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::database::models::{Announcement, AnnouncementFeed, Suggestion};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub announcement: String,
}

/// POST /users/admin/announcement - Broadcast to everyone
pub async fn broadcast(
    State(state): State<AppState>,
    payload: Result<Json<AnnouncementRequest>, JsonRejection>,
) -> ApiResult<Announcement> {
    let Json(payload) = payload?;
    let announcement = state
        .channel
        .broadcast(&payload.title, &payload.announcement, Utc::now())
        .await?;
    Ok(ApiResponse::created(announcement))
}

/// GET /users/admin/announcement
pub async fn announcements(State(state): State<AppState>) -> ApiResult<AnnouncementFeed> {
    let feed = state.channel.feed(Utc::now()).await?;
    Ok(ApiResponse::success(feed))
}

/// GET /users/admin/viewSuggestions
pub async fn suggestions(State(state): State<AppState>) -> ApiResult<Vec<Suggestion>> {
    let suggestions = state.channel.list_suggestions().await?;
    Ok(ApiResponse::success(suggestions))
}
