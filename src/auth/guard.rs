use std::sync::Arc;

use tracing::warn;

use crate::auth::{AuthError, JwtService, UserRole};
use crate::models::User;
use crate::store::UserStore;

/// Resolves bearer tokens to live users and enforces role membership.
///
/// The role is read from storage on every resolution rather than from the
/// token, so a role change takes effect on the next request.
#[derive(Clone)]
pub struct AccessGuard {
    jwt_service: JwtService,
    users: Arc<dyn UserStore>,
}

impl AccessGuard {
    pub fn new(jwt_service: JwtService, users: Arc<dyn UserStore>) -> Self {
        Self { jwt_service, users }
    }

    /// Verify a token and load the user it names.
    pub async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        let subject = self.jwt_service.verify(token)?;
        let user_id: i64 = subject.parse().map_err(|_| AuthError::MalformedToken)?;

        self.users
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Pass the user through when their role is in `allowed`.
    pub fn require(user: User, allowed: &[UserRole]) -> Result<User, AuthError> {
        if user.role.is_in(allowed) {
            Ok(user)
        } else {
            warn!(user_id = user.id, role = %user.role, "access denied");
            Err(AuthError::Forbidden)
        }
    }

    /// Resolve and check in one step.
    pub async fn authorize(&self, token: &str, allowed: &[UserRole]) -> Result<User, AuthError> {
        let user = self.resolve(token).await?;
        Self::require(user, allowed)
    }
}
