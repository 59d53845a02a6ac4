use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::models::{Decision, LeaveApplication, LeaveStatus, LeaveWithOwner, NewLeave};
use crate::database::DatabaseError;

use super::{require_field, ServiceError};

/// Leave workflow: staff submit, admins decide
#[derive(Clone)]
pub struct LeaveService {
    pool: SqlitePool,
}

impl LeaveService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// File a new application in `pending`. Dates are stored as given.
    pub async fn submit(&self, staff_id: i64, leave: NewLeave) -> Result<LeaveApplication, ServiceError> {
        require_field("reason", &leave.reason)?;
        require_field("start_date", &leave.start_date)?;
        require_field("end_date", &leave.end_date)?;

        let result = sqlx::query(
            "INSERT INTO leaveApplications (staffId, reason, start_date, end_date, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(staff_id)
        .bind(leave.reason.trim())
        .bind(leave.start_date.trim())
        .bind(leave.end_date.trim())
        .bind(LeaveStatus::Pending)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_owned_insert)?;

        let id = result.last_insert_rowid();
        info!("Staff {} submitted leave application {}", staff_id, id);
        self.find(id).await
    }

    pub async fn find(&self, id: i64) -> Result<LeaveApplication, ServiceError> {
        sqlx::query_as::<_, LeaveApplication>(
            "SELECT id, staffId, reason, start_date, end_date, status FROM leaveApplications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Leave application not found".to_string()))
    }

    /// Every application owned by `staff_id`, regardless of status
    pub async fn list_for_staff(&self, staff_id: i64) -> Result<Vec<LeaveApplication>, ServiceError> {
        let applications = sqlx::query_as::<_, LeaveApplication>(
            "SELECT id, staffId, reason, start_date, end_date, status FROM leaveApplications WHERE staffId = ? ORDER BY id",
        )
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    pub async fn list_all(&self) -> Result<Vec<LeaveWithOwner>, ServiceError> {
        let applications = sqlx::query_as::<_, LeaveWithOwner>(
            r#"
            SELECT la.id, la.staffId, la.reason, la.start_date, la.end_date, la.status, s.name, s.email
            FROM leaveApplications la
            JOIN staff s ON la.staffId = s.id
            ORDER BY la.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// Decide a single application by id. Deciding an already decided
    /// application overwrites the earlier outcome.
    pub async fn decide(&self, id: i64, decision: Decision) -> Result<LeaveApplication, ServiceError> {
        let current = self.find(id).await?;
        let next = decision.status();

        if current.status.is_terminal() {
            warn!("Leave application {} already {}, overwriting with {}", id, current.status, next);
        }

        sqlx::query("UPDATE leaveApplications SET status = ? WHERE id = ?")
            .bind(next)
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("Leave application {} is now {}", id, next);
        self.find(id).await
    }

    /// Decide every application of the staff member owning `email`.
    /// Returns how many applications changed.
    pub async fn decide_for_staff(&self, email: &str, decision: Decision) -> Result<u64, ServiceError> {
        let staff: Option<(i64,)> = sqlx::query_as("SELECT id FROM staff WHERE email = ?")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;
        let (staff_id,) = staff.ok_or_else(|| ServiceError::NotFound("Staff not found".to_string()))?;

        let next = decision.status();
        let updated = sqlx::query("UPDATE leaveApplications SET status = ? WHERE staffId = ?")
            .bind(next)
            .bind(staff_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        info!("{} leave application(s) of {} set to {}", updated, email.trim(), next);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::services::AccountService;
    use crate::testing::{memory_db, new_account};

    fn leave(reason: &str) -> NewLeave {
        NewLeave {
            reason: reason.to_string(),
            start_date: "2024-05-01".to_string(),
            end_date: "2024-05-03".to_string(),
        }
    }

    async fn setup() -> (crate::database::DatabaseManager, LeaveService, i64) {
        let db = memory_db().await;
        let accounts = AccountService::new(db.pool().clone(), 4);
        let staff_id = accounts.register(new_account("ama@x.com", Role::Staff)).await.unwrap();
        let service = LeaveService::new(db.pool().clone());
        (db, service, staff_id)
    }

    #[tokio::test]
    async fn submitted_leave_starts_pending() {
        let (_db, service, staff_id) = setup().await;
        let application = service.submit(staff_id, leave("Medical")).await.unwrap();

        assert_eq!(application.status, LeaveStatus::Pending);
        assert_eq!(application.staff_id, staff_id);
        assert_eq!(service.list_for_staff(staff_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let (_db, service, staff_id) = setup().await;
        let mut incomplete = leave("Medical");
        incomplete.end_date = "  ".to_string();

        let result = service.submit(staff_id, incomplete).await;
        assert!(matches!(result, Err(ServiceError::MissingField("end_date"))));
        assert!(service.list_for_staff(staff_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_owner_is_not_found() {
        let (_db, service, _staff_id) = setup().await;
        let result = service.submit(9999, leave("Ghost")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn second_decision_overwrites_first() {
        let (_db, service, staff_id) = setup().await;
        let application = service.submit(staff_id, leave("Family")).await.unwrap();

        let approved = service.decide(application.id, Decision::Approved).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);

        let rejected = service.decide(application.id, Decision::Rejected).await.unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
    }

    #[tokio::test]
    async fn deciding_unknown_application_is_not_found() {
        let (_db, service, _staff_id) = setup().await;
        let result = service.decide(12345, Decision::Approved).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn decide_by_email_touches_all_of_that_staff() {
        let (db, service, staff_id) = setup().await;
        let other = AccountService::new(db.pool().clone(), 4)
            .register(new_account("yaw@x.com", Role::Staff))
            .await
            .unwrap();

        service.submit(staff_id, leave("One")).await.unwrap();
        service.submit(staff_id, leave("Two")).await.unwrap();
        let untouched = service.submit(other, leave("Three")).await.unwrap();

        let updated = service.decide_for_staff("ama@x.com", Decision::Rejected).await.unwrap();
        assert_eq!(updated, 2);
        assert!(service
            .list_for_staff(staff_id)
            .await
            .unwrap()
            .iter()
            .all(|a| a.status == LeaveStatus::Rejected));
        assert_eq!(service.find(untouched.id).await.unwrap().status, LeaveStatus::Pending);

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|a| a.email == "yaw@x.com"));

        let missing = service.decide_for_staff("nobody@x.com", Decision::Approved).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }
}
