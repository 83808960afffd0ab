use chrono::{DateTime, Utc};
use db::models::user;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: format_ts(user.created_at),
            updated_at: format_ts(user.updated_at),
        }
    }
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}
