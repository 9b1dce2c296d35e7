use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub badges: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// First word of the full name, or `User` when none is recorded.
    pub fn display_name(&self) -> String {
        self.full_name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .unwrap_or("User")
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
}
