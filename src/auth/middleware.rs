use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
        HeaderName, HeaderValue, Method,
    },
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

use crate::auth::{extract_bearer_token, AccessGuard, AuthError, UserRole};
use crate::models::User;

/// The authenticated caller, resolved from the `Authorization: Bearer` header.
///
/// Handlers that take this extractor reject anonymous requests with 401
/// before running.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Unwrap the user if their role is in `allowed`, otherwise `Forbidden`.
    pub fn require(self, allowed: &[UserRole]) -> Result<User, AuthError> {
        AccessGuard::require(self.0, allowed)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AccessGuard: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeaderFormat)?;

        let token = extract_bearer_token(auth_header)?;
        let user = AccessGuard::from_ref(state).resolve(token).await?;

        Ok(CurrentUser(user))
    }
}

/// CORS configuration.
///
/// With no configured origins any origin is allowed and credentials are not;
/// otherwise only the listed origins are allowed, with credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(allowed).allow_credentials(true)
}

/// Security headers middleware
pub fn security_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_require() {
        let user = User {
            id: 1,
            email: "coach@x.com".to_string(),
            name: "Coach".to_string(),
            password_hash: String::new(),
            role: UserRole::Coach,
            club_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        assert!(CurrentUser(user.clone()).require(UserRole::CONTRIBUTORS).is_ok());
        assert!(matches!(
            CurrentUser(user).require(UserRole::REVIEWERS),
            Err(AuthError::Forbidden)
        ));
    }
}
