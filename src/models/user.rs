use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::UserRole;

/// A stored account. Never serialized directly; use [`UserResponse`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub club_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the users table; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub club_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
    pub club_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserRole {
    pub role: UserRole,
}

/// Public profile of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub club_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            club_id: user.club_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
