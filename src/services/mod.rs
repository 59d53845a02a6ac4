pub mod account_service;
pub mod channel_service;
pub mod leave_service;
pub mod stats_service;
pub mod submission_service;

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::uploads::UploadError;

pub use account_service::AccountService;
pub use channel_service::ChannelService;
pub use leave_service::LeaveService;
pub use stats_service::{PortalStats, StatsService};
pub use submission_service::{MaterialSubmission, SubmissionService};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            DatabaseError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Database(other),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}

/// Reject absent or whitespace-only input
pub(crate) fn require_field(field: &'static str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::MissingField(field))
    } else {
        Ok(())
    }
}
