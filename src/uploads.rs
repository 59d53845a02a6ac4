use axum::body::Bytes;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::config::UploadConfig;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only PDF and Word documents are allowed (got '{0}')")]
    DisallowedType(String),

    #[error("File is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Uploaded file is empty")]
    Empty,

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// A file part received from a multipart request, not yet written anywhere
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

/// Writes accepted teaching-material files below one directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: usize,
    allowed_mime_types: Vec<String>,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_bytes: config.max_bytes,
            allowed_mime_types: config.allowed_mime_types.iter().map(|m| normalize_mime(m)).collect(),
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn check_type(&self, mime_type: &str) -> Result<(), UploadError> {
        let mime = normalize_mime(mime_type);
        if self.allowed_mime_types.iter().any(|allowed| *allowed == mime) {
            Ok(())
        } else {
            Err(UploadError::DisallowedType(mime))
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), UploadError> {
        if size == 0 {
            return Err(UploadError::Empty);
        }
        if size > self.max_bytes {
            return Err(UploadError::TooLarge { size, max: self.max_bytes });
        }
        Ok(())
    }

    /// Validate, then write the file. Nothing touches the disk unless both checks pass.
    pub async fn persist(&self, file: &UploadedFile) -> Result<StoredFile, UploadError> {
        self.check_type(&file.mime_type)?;
        self.check_size(file.bytes.len())?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let stored_name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            sanitize_file_name(&file.original_name)
        );
        let path = self.dir.join(stored_name);
        tokio::fs::write(&path, &file.bytes).await?;

        tracing::debug!("Stored upload {} ({} bytes)", path.display(), file.bytes.len());

        Ok(StoredFile {
            path: path.to_string_lossy().into_owned(),
            original_name: file.original_name.clone(),
            mime_type: normalize_mime(&file.mime_type),
            size_bytes: file.bytes.len(),
        })
    }
}

/// Best-effort removal of a stored file; a missing file is not an error
pub async fn discard(path: impl AsRef<Path>) {
    let path = path.as_ref();
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!("Removed stored file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove stored file {}: {}", path.display(), e),
    }
}

fn normalize_mime(mime: &str) -> String {
    mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Reduce a client-supplied file name to a safe final path component
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(&['/', '\\'][..]).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
