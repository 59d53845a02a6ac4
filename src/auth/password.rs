use rand::distributions::Alphanumeric;
use rand::Rng;

use super::AuthError;

pub const TEMP_PASSWORD_LEN: usize = 12;

/// Hash a raw password with bcrypt (per-record salt is embedded in the hash).
/// Runs on the blocking pool.
pub async fn hash_password(raw: &str, cost: u32) -> Result<String, AuthError> {
    let raw = raw.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a raw password against a stored bcrypt hash
pub async fn verify_password(raw: &str, hash: &str) -> Result<bool, AuthError> {
    let raw = raw.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(raw, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn generate_temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
