//! Fixtures shared by the unit tests

use std::path::Path;

use crate::auth::Role;
use crate::config::{AppConfig, UploadConfig};
use crate::database::models::NewAccount;
use crate::database::DatabaseManager;

pub const TEST_PASSWORD: &str = "password123";

/// Fresh in-memory database with the schema applied
pub async fn memory_db() -> DatabaseManager {
    DatabaseManager::in_memory().await.expect("in-memory database")
}

pub fn new_account(email: &str, role: Role) -> NewAccount {
    NewAccount {
        name: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        role,
    }
}

/// Development config with a cheap bcrypt cost and uploads under `upload_dir`
pub fn test_config(upload_dir: &Path) -> AppConfig {
    let mut config = AppConfig::development();
    config.database.url = "sqlite::memory:".to_string();
    config.security.jwt_secret = "test-secret".to_string();
    config.security.bcrypt_cost = 4;
    config.uploads = UploadConfig {
        dir: upload_dir.to_path_buf(),
        ..UploadConfig::default()
    };
    config
}
