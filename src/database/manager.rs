use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager and the stores built on its pool
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map a unique-constraint violation to `Conflict`, anything else passes through
    pub fn from_insert(err: sqlx::Error, conflict_message: impl Into<String>) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => DatabaseError::Conflict(conflict_message.into()),
            _ => DatabaseError::Sqlx(err),
        }
    }

    /// Map a foreign-key violation (owner account vanished) to `NotFound`
    pub fn from_owned_insert(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_foreign_key_violation() => {
                DatabaseError::NotFound("Owning account not found".to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS staff (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('staff', 'admin')),
        classTaught TEXT,
        subject TEXT,
        contact TEXT,
        address TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leaveApplications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        staffId INTEGER NOT NULL,
        reason TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'rejected')),
        FOREIGN KEY (staffId) REFERENCES staff(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teaching_materials (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        file_path TEXT NOT NULL,
        original_name TEXT NOT NULL,
        mime_type TEXT NOT NULL,
        size_bytes INTEGER NOT NULL,
        submitted_at TEXT NOT NULL,
        FOREIGN KEY (staff_id) REFERENCES staff(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS talms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id INTEGER NOT NULL,
        week TEXT NOT NULL,
        topic TEXT NOT NULL,
        notes TEXT,
        created_at TEXT NOT NULL,
        FOREIGN KEY (staff_id) REFERENCES staff(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS announcements (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        announcement_title TEXT NOT NULL,
        announcement TEXT NOT NULL,
        announcement_date TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS suggestions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        suggestion_box TEXT NOT NULL,
        suggestion_time TEXT NOT NULL
    )
    "#,
];

/// Owns the single connection pool of the portal. Constructed once at startup
/// and handed to every service; there is no global instance.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.url.trim().is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(config.url.clone()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(config.connection_timeout));

        let pool = if Self::is_memory_url(&config.url) {
            // Every in-memory connection is its own database: pin exactly one
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            if let Some(parent) = Self::database_file(&config.url).and_then(|path| path.parent()) {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            pool_options
                .max_connections(config.max_connections.max(1))
                .connect_with(options)
                .await?
        };

        info!("Connected database pool: {}", config.url);
        Ok(Self { pool })
    }

    /// Fresh in-memory database with the schema applied
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let manager = Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
        })
        .await?;
        manager.init_schema().await?;
        Ok(manager)
    }

    /// Create all tables if they do not exist yet. Safe to run on every start.
    pub async fn init_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready ({} tables)", SCHEMA.len());
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    fn is_memory_url(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    fn database_file(url: &str) -> Option<&Path> {
        let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next()?;
        (!path.is_empty()).then(|| Path::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_database_file_from_url() {
        assert_eq!(
            DatabaseManager::database_file("sqlite://data/database.sqlite?mode=rwc"),
            Some(Path::new("data/database.sqlite"))
        );
        assert_eq!(DatabaseManager::database_file("sqlite:portal.db"), Some(Path::new("portal.db")));
        assert_eq!(DatabaseManager::database_file("postgres://localhost/db"), None);
        assert!(DatabaseManager::is_memory_url("sqlite::memory:"));
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let db = DatabaseManager::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        db.health_check().await.unwrap();

        let (tables,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
             ('staff', 'leaveApplications', 'teaching_materials', 'talms', 'announcements', 'suggestions')",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(tables, 6);
    }

    #[test]
    fn rejects_blank_url() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let result = rt.block_on(DatabaseManager::connect(&DatabaseConfig {
            url: " ".to_string(),
            max_connections: 1,
            connection_timeout: 1,
        }));
        assert!(matches!(result, Err(DatabaseError::ConfigMissing("DATABASE_URL"))));
    }
}
