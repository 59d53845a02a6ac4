use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::ServiceError;

/// Head counts for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, FromRow, PartialEq, Eq)]
pub struct PortalStats {
    pub staff: i64,
    pub admins: i64,
    pub leave_pending: i64,
    pub leave_approved: i64,
    pub leave_rejected: i64,
    pub materials: i64,
    pub topic_logs: i64,
    pub announcements: i64,
    pub suggestions: i64,
}

#[derive(Clone)]
pub struct StatsService {
    pool: SqlitePool,
}

impl StatsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn stats(&self) -> Result<PortalStats, ServiceError> {
        let stats = sqlx::query_as::<_, PortalStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM staff WHERE role = 'staff') AS staff,
                (SELECT COUNT(*) FROM staff WHERE role = 'admin') AS admins,
                (SELECT COUNT(*) FROM leaveApplications WHERE status = 'pending') AS leave_pending,
                (SELECT COUNT(*) FROM leaveApplications WHERE status = 'approved') AS leave_approved,
                (SELECT COUNT(*) FROM leaveApplications WHERE status = 'rejected') AS leave_rejected,
                (SELECT COUNT(*) FROM teaching_materials) AS materials,
                (SELECT COUNT(*) FROM talms) AS topic_logs,
                (SELECT COUNT(*) FROM announcements) AS announcements,
                (SELECT COUNT(*) FROM suggestions) AS suggestions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}
