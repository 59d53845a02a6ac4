use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Announcements newer than this are listed as "recent"
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Announcement {
    pub id: i64,
    #[sqlx(rename = "announcement_title")]
    pub title: String,
    #[sqlx(rename = "announcement")]
    pub body: String,
    #[sqlx(rename = "announcement_date")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementFeed {
    pub recent: Vec<Announcement>,
    pub old: Vec<Announcement>,
}

impl AnnouncementFeed {
    /// Split announcements at `now - 7 days`. Input order is preserved in both halves.
    pub fn partition(announcements: Vec<Announcement>, now: DateTime<Utc>) -> Self {
        let boundary = now - Duration::days(RECENT_WINDOW_DAYS);
        let (recent, old) = announcements
            .into_iter()
            .partition(|announcement| announcement.created_at > boundary);
        Self { recent, old }
    }
}

/// Anonymous feedback; no link to the submitting account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Suggestion {
    pub id: i64,
    #[sqlx(rename = "suggestion_box")]
    pub body: String,
    #[sqlx(rename = "suggestion_time")]
    pub submitted_at: DateTime<Utc>,
}
