use chrono::{DateTime, Utc};

/// Role assigned to self-registered actors
pub const DEFAULT_ROLE_ID: i32 = 2;

/// Role of the seeded administrator
pub const ADMIN_ROLE_ID: i32 = 1;

/// Actor (user account) model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role_id: i32,
    pub verified: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
