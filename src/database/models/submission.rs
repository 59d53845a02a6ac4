use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Teaching-learning material (TLM): an uploaded document owned by one staff member
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeachingMaterial {
    pub id: i64,
    pub staff_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaterialWithOwner {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub submitted_at: DateTime<Utc>,
    pub staff_name: Option<String>,
    pub staff_email: String,
}

/// Weekly topic log (TALM); free text, no file
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicLog {
    pub id: i64,
    pub staff_id: i64,
    pub week: String,
    pub topic: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicLogWithOwner {
    pub id: i64,
    pub week: String,
    pub topic: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub staff_name: Option<String>,
    pub staff_email: String,
}

#[derive(Debug, Clone)]
pub struct NewTopicLog {
    pub week: String,
    pub topic: String,
    pub notes: Option<String>,
}
