use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::models::{MaterialWithOwner, NewTopicLog, TeachingMaterial, TopicLog, TopicLogWithOwner};
use crate::database::DatabaseError;
use crate::uploads::{self, UploadStore, UploadedFile};

use super::{require_field, ServiceError};

#[derive(Debug, Clone)]
pub struct MaterialSubmission {
    pub title: String,
    pub description: Option<String>,
    pub file: UploadedFile,
}

/// Staff-submitted teaching materials (files) and topic logs (text)
#[derive(Clone)]
pub struct SubmissionService {
    pool: SqlitePool,
    uploads: UploadStore,
}

impl SubmissionService {
    pub fn new(pool: SqlitePool, uploads: UploadStore) -> Self {
        Self { pool, uploads }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    /// Store the file, then record its path. If the record cannot be written
    /// the stored file is removed again.
    pub async fn submit_material(
        &self,
        staff_id: i64,
        submission: MaterialSubmission,
    ) -> Result<TeachingMaterial, ServiceError> {
        require_field("title", &submission.title)?;

        let stored = self.uploads.persist(&submission.file).await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO teaching_materials
                (staff_id, title, description, file_path, original_name, mime_type, size_bytes, submitted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(staff_id)
        .bind(submission.title.trim())
        .bind(submission.description.as_deref().map(str::trim))
        .bind(&stored.path)
        .bind(&stored.original_name)
        .bind(&stored.mime_type)
        .bind(stored.size_bytes as i64)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        let id = match inserted {
            Ok(result) => result.last_insert_rowid(),
            Err(e) => {
                uploads::discard(&stored.path).await;
                return Err(DatabaseError::from_owned_insert(e).into());
            }
        };

        info!("Staff {} uploaded teaching material {} ({})", staff_id, id, stored.path);

        let material = sqlx::query_as::<_, TeachingMaterial>(
            r#"
            SELECT id, staff_id, title, description, file_path, original_name, mime_type, size_bytes, submitted_at
            FROM teaching_materials WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(material)
    }

    pub async fn submit_topic_log(&self, staff_id: i64, log: NewTopicLog) -> Result<TopicLog, ServiceError> {
        require_field("week", &log.week)?;
        require_field("topic", &log.topic)?;

        let notes = log.notes.as_deref().map(str::trim).filter(|n| !n.is_empty());

        let result = sqlx::query("INSERT INTO talms (staff_id, week, topic, notes, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(staff_id)
            .bind(log.week.trim())
            .bind(log.topic.trim())
            .bind(notes)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_owned_insert)?;

        let id = result.last_insert_rowid();
        info!("Staff {} logged topic {} for week {}", staff_id, id, log.week.trim());

        let log = sqlx::query_as::<_, TopicLog>(
            "SELECT id, staff_id, week, topic, notes, created_at FROM talms WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }

    /// All materials with their owners, newest first. Empty is `NotFound`.
    pub async fn list_materials(&self) -> Result<Vec<MaterialWithOwner>, ServiceError> {
        let materials = sqlx::query_as::<_, MaterialWithOwner>(
            r#"
            SELECT
                m.id, m.title, m.description, m.file_path, m.original_name, m.mime_type,
                m.size_bytes, m.submitted_at,
                s.name AS staff_name, s.email AS staff_email
            FROM teaching_materials m
            JOIN staff s ON m.staff_id = s.id
            ORDER BY m.submitted_at DESC, m.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if materials.is_empty() {
            return Err(ServiceError::NotFound("No teaching materials found".to_string()));
        }
        Ok(materials)
    }

    pub async fn list_topic_logs(&self) -> Result<Vec<TopicLogWithOwner>, ServiceError> {
        let logs = sqlx::query_as::<_, TopicLogWithOwner>(
            r#"
            SELECT
                t.id, t.week, t.topic, t.notes, t.created_at,
                s.name AS staff_name, s.email AS staff_email
            FROM talms t
            JOIN staff s ON t.staff_id = s.id
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if logs.is_empty() {
            return Err(ServiceError::NotFound("No topic logs found".to_string()));
        }
        Ok(logs)
    }
}
