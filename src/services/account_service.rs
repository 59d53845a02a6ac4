use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::Role;
use crate::database::models::{Account, AccountProfile, DeletedAccount, NewAccount, ProfileUpdate};
use crate::database::DatabaseError;
use crate::uploads;

use super::{require_field, ServiceError};

const PROFILE_COLUMNS: &str = "id, name, email, role, classTaught, subject, contact, address";

/// Credential store: the only place passwords are hashed or checked
#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Create an account, returning its id. Fails with `Conflict` when the email is taken.
    pub async fn register(&self, account: NewAccount) -> Result<i64, ServiceError> {
        require_field("email", &account.email)?;
        require_field("password", &account.password)?;
        let email = account.email.trim().to_string();

        if self.find_id_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict("User exists".to_string()));
        }

        let hashed = hash_password(&account.password, self.bcrypt_cost).await?;

        let result = sqlx::query("INSERT INTO staff (name, email, password, role) VALUES (?, ?, ?, ?)")
            .bind(account.name.trim())
            .bind(&email)
            .bind(hashed)
            .bind(account.role)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_insert(e, "User exists"))?;

        let id = result.last_insert_rowid();
        info!("Registered {} account {} ({})", account.role, id, email);
        Ok(id)
    }

    /// Verify an email/password pair. With `required_role`, accounts of any other
    /// role are treated exactly like unknown emails.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        required_role: Option<Role>,
    ) -> Result<AccountProfile, ServiceError> {
        let account: Option<Account> =
            sqlx::query_as("SELECT id, name, email, password, role FROM staff WHERE email = ?")
                .bind(email.trim())
                .fetch_optional(&self.pool)
                .await?;

        let account = account.ok_or(ServiceError::InvalidCredentials)?;

        if let Some(required) = required_role {
            if !account.role.satisfies(required) {
                warn!("Login for {} rejected: role {} is not {}", account.email, account.role, required);
                return Err(ServiceError::InvalidCredentials);
            }
        }

        if !verify_password(password, &account.password).await? {
            warn!("Login for {} rejected: password mismatch", account.email);
            return Err(ServiceError::InvalidCredentials);
        }

        self.profile(account.id).await
    }

    pub async fn profile(&self, id: i64) -> Result<AccountProfile, ServiceError> {
        sqlx::query_as::<_, AccountProfile>(&format!("SELECT {} FROM staff WHERE id = ?", PROFILE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Staff not found".to_string()))
    }

    pub async fn list_profiles(&self) -> Result<Vec<AccountProfile>, ServiceError> {
        let profiles = sqlx::query_as::<_, AccountProfile>(&format!("SELECT {} FROM staff ORDER BY id", PROFILE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles)
    }

    pub async fn find_id_by_email(&self, email: &str) -> Result<Option<i64>, ServiceError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM staff WHERE email = ?")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Apply a partial profile edit. Role is not editable; the password is only
    /// replaced when a new one is supplied.
    pub async fn update_profile(&self, id: i64, update: ProfileUpdate) -> Result<AccountProfile, ServiceError> {
        let email = update.email.as_deref().map(str::trim).filter(|e| !e.is_empty());

        if let Some(email) = email {
            if let Some(owner) = self.find_id_by_email(email).await? {
                if owner != id {
                    return Err(ServiceError::Conflict("Email already in use".to_string()));
                }
            }
        }

        let hashed = match update.password.as_deref().filter(|p| !p.is_empty()) {
            Some(raw) => Some(hash_password(raw, self.bcrypt_cost).await?),
            None => None,
        };

        let result = sqlx::query(
            r#"
            UPDATE staff SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                password = COALESCE(?, password),
                classTaught = COALESCE(?, classTaught),
                subject = COALESCE(?, subject),
                contact = COALESCE(?, contact),
                address = COALESCE(?, address)
            WHERE id = ?
            "#,
        )
        .bind(update.name)
        .bind(email)
        .bind(hashed.as_deref())
        .bind(update.class_taught)
        .bind(update.subject)
        .bind(update.contact)
        .bind(update.address)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_insert(e, "Email already in use"))?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Staff not found".to_string()));
        }

        if hashed.is_some() {
            info!("Account {} rotated its password", id);
        }
        self.profile(id).await
    }

    /// Remove an account and everything it owns in one transaction. Stored
    /// material files are removed afterwards, best-effort.
    pub async fn delete_account(&self, id: i64) -> Result<DeletedAccount, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let email: Option<(String,)> = sqlx::query_as("SELECT email FROM staff WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let (email,) = email.ok_or_else(|| ServiceError::NotFound("Staff not found".to_string()))?;

        let files: Vec<(String,)> = sqlx::query_as("SELECT file_path FROM teaching_materials WHERE staff_id = ?")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        let leave_applications = sqlx::query("DELETE FROM leaveApplications WHERE staffId = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let materials = sqlx::query("DELETE FROM teaching_materials WHERE staff_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let topic_logs = sqlx::query("DELETE FROM talms WHERE staff_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let material_files: Vec<String> = files.into_iter().map(|(path,)| path).collect();
        for path in &material_files {
            uploads::discard(path).await;
        }

        info!(
            "Deleted account {} ({}) with {} leave applications, {} materials, {} topic logs",
            id, email, leave_applications, materials, topic_logs
        );

        Ok(DeletedAccount {
            id,
            email,
            leave_applications,
            materials,
            topic_logs,
            material_files,
        })
    }

    pub async fn delete_by_email(&self, email: &str) -> Result<DeletedAccount, ServiceError> {
        let id = self
            .find_id_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Staff not found".to_string()))?;
        self.delete_account(id).await
    }
}
