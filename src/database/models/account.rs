use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Role;

/// Full account row, including the password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Public profile fields of an account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct AccountProfile {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    #[serde(rename = "classTaught")]
    #[sqlx(rename = "classTaught")]
    pub class_taught: Option<String>,
    pub subject: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Self-service profile edit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "classTaught")]
    pub class_taught: Option<String>,
    pub subject: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

/// What a removed account left behind on disk
#[derive(Debug, Clone, Serialize)]
pub struct DeletedAccount {
    pub id: i64,
    pub email: String,
    pub leave_applications: u64,
    pub materials: u64,
    pub topic_logs: u64,
    #[serde(skip)]
    pub material_files: Vec<String>,
}
