use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a leave application: `pending` is the only initial state,
/// `approved` and `rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Admin outcome for a leave application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    #[serde(alias = "approve")]
    Approved,
    #[serde(alias = "reject")]
    Rejected,
}

impl LeaveStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Decision {
    /// The status a decision writes, whatever the application held before.
    /// A later decision overwrites an earlier one; none leads back to `pending`.
    pub fn status(self) -> LeaveStatus {
        match self {
            Decision::Approved => LeaveStatus::Approved,
            Decision::Rejected => LeaveStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "approved" | "approve" => Ok(Decision::Approved),
            "rejected" | "reject" => Ok(Decision::Rejected),
            other => Err(format!("Unknown leave decision '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaveApplication {
    pub id: i64,
    #[serde(rename = "staffId")]
    #[sqlx(rename = "staffId")]
    pub staff_id: i64,
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
    pub status: LeaveStatus,
}

/// Leave application joined with its owner, for the admin review list
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaveWithOwner {
    pub id: i64,
    #[serde(rename = "staffId")]
    #[sqlx(rename = "staffId")]
    pub staff_id: i64,
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
    pub status: LeaveStatus,
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewLeave {
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
}
