use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User roles for role-based access control.
///
/// The set is closed; the wire names match the values stored in the
/// `users.role` column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    #[serde(rename = "platform_admin")]
    PlatformAdmin,
    #[serde(rename = "bfv_admin")]
    FederationAdmin,
    #[serde(rename = "coach")]
    Coach,
}

impl UserRole {
    /// Anyone allowed to submit content suggestions.
    pub const CONTRIBUTORS: &'static [UserRole] =
        &[UserRole::Coach, UserRole::FederationAdmin, UserRole::PlatformAdmin];

    /// Roles allowed to review suggestions and manage canonical records.
    pub const REVIEWERS: &'static [UserRole] = &[UserRole::FederationAdmin, UserRole::PlatformAdmin];

    pub const PLATFORM_ADMINS: &'static [UserRole] = &[UserRole::PlatformAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::PlatformAdmin => "platform_admin",
            UserRole::FederationAdmin => "bfv_admin",
            UserRole::Coach => "coach",
        }
    }

    /// Position in the privilege order, coach being the lowest.
    pub fn rank(&self) -> u8 {
        match self {
            UserRole::Coach => 0,
            UserRole::FederationAdmin => 1,
            UserRole::PlatformAdmin => 2,
        }
    }

    pub fn is_in(&self, allowed: &[UserRole]) -> bool {
        allowed.contains(self)
    }

    pub fn is_admin(&self) -> bool {
        self.rank() > UserRole::Coach.rank()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform_admin" => Ok(UserRole::PlatformAdmin),
            "bfv_admin" => Ok(UserRole::FederationAdmin),
            "coach" => Ok(UserRole::Coach),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// JWT token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // Subject (numeric user id)
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration time
    pub jti: String, // Token id
}

/// A freshly minted access token together with its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            access_token: issued.token,
            token_type: "bearer".to_string(),
            expires_in: issued.expires_in,
        }
    }
}
