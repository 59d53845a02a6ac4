use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::{NewTopicLog, TeachingMaterial, TopicLog};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::MaterialSubmission;
use crate::state::AppState;
use crate::uploads::UploadedFile;

/// POST /users/staff/submitTLMs - Upload a teaching-learning material
///
/// Multipart fields: `file` (PDF or Word document), `title`, `description`.
/// The file's type is checked as soon as its part arrives, before its body is read.
pub async fn submit_material(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> ApiResult<TeachingMaterial> {
    let uploads = state.submissions.uploads();

    let mut title = String::new();
    let mut description = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let mime_type = field.content_type().unwrap_or("application/octet-stream").to_string();
                if let Err(e) = uploads.check_type(&mime_type) {
                    tracing::warn!("Staff {} upload rejected: {}", user.id, e);
                    return Err(e.into());
                }

                let original_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await?;
                if let Err(e) = uploads.check_size(bytes.len()) {
                    tracing::warn!("Staff {} upload rejected: {}", user.id, e);
                    return Err(e.into());
                }

                file = Some(UploadedFile {
                    original_name,
                    mime_type,
                    bytes,
                });
            }
            "title" => title = field.text().await?,
            "description" => description = Some(field.text().await?).filter(|d| !d.trim().is_empty()),
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let material = state
        .submissions
        .submit_material(
            user.id,
            MaterialSubmission {
                title,
                description,
                file,
            },
        )
        .await?;

    Ok(ApiResponse::created(material))
}

#[derive(Debug, Deserialize)]
pub struct TopicLogRequest {
    #[serde(default)]
    pub week: String,
    #[serde(default)]
    pub topic: String,
    pub notes: Option<String>,
}

/// POST /users/staff/submitTALMs - Record a weekly topic log
pub async fn submit_topic_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<TopicLogRequest>, JsonRejection>,
) -> ApiResult<TopicLog> {
    let Json(payload) = payload?;
    let log = state
        .submissions
        .submit_topic_log(
            user.id,
            NewTopicLog {
                week: payload.week,
                topic: payload.topic,
                notes: payload.notes,
            },
        )
        .await?;

    Ok(ApiResponse::created(log))
}
