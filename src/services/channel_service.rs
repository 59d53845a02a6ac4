use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::models::{Announcement, AnnouncementFeed, Suggestion};

use super::{require_field, ServiceError};

/// Announcements (admin to everyone) and the anonymous suggestion box
#[derive(Clone)]
pub struct ChannelService {
    pool: SqlitePool,
}

impl ChannelService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn broadcast(&self, title: &str, body: &str, at: DateTime<Utc>) -> Result<Announcement, ServiceError> {
        require_field("title", title)?;
        require_field("announcement", body)?;

        let result = sqlx::query(
            "INSERT INTO announcements (announcement_title, announcement, announcement_date) VALUES (?, ?, ?)",
        )
        .bind(title.trim())
        .bind(body.trim())
        .bind(at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!("Announcement {} published", id);

        Ok(Announcement {
            id,
            title: title.trim().to_string(),
            body: body.trim().to_string(),
            created_at: at,
        })
    }

    /// Newest first
    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, ServiceError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT id, announcement_title, announcement, announcement_date
            FROM announcements
            ORDER BY announcement_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(announcements)
    }

    pub async fn feed(&self, now: DateTime<Utc>) -> Result<AnnouncementFeed, ServiceError> {
        let announcements = self.list_announcements().await?;
        Ok(AnnouncementFeed::partition(announcements, now))
    }

    pub async fn submit_suggestion(&self, body: &str, at: DateTime<Utc>) -> Result<Suggestion, ServiceError> {
        require_field("suggestion", body)?;

        let result = sqlx::query("INSERT INTO suggestions (suggestion_box, suggestion_time) VALUES (?, ?)")
            .bind(body.trim())
            .bind(at)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        info!("Suggestion {} received", id);

        Ok(Suggestion {
            id,
            body: body.trim().to_string(),
            submitted_at: at,
        })
    }

    pub async fn list_suggestions(&self) -> Result<Vec<Suggestion>, ServiceError> {
        let suggestions = sqlx::query_as::<_, Suggestion>(
            "SELECT id, suggestion_box, suggestion_time FROM suggestions ORDER BY suggestion_time DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(suggestions)
    }
}
