use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateClub {
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
}

/// A club together with the coaches affiliated to it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClubDetail {
    #[serde(flatten)]
    pub club: Club,
    pub coaches: Vec<UserResponse>,
}
