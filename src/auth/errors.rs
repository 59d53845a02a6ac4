use thiserror::Error;

/// Failures of the credential and session layer
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    TokenMissing,

    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    #[error("Role '{actual}' cannot access '{required}' resources")]
    Forbidden { required: String, actual: String },

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Token expiry of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
