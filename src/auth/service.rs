use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{AuthError, IssuedToken, JwtService, LoginRequest, PasswordHasher, TokenResponse};
use crate::models::User;
use crate::store::UserStore;

/// Checks credentials and mints access tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_service: JwtService,
    hasher: PasswordHasher,
    // Verified against when the email is unknown so both failure paths cost one bcrypt check.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt_service: JwtService,
        hasher: PasswordHasher,
    ) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash("not-a-real-password")?;

        Ok(Self {
            users,
            jwt_service,
            hasher,
            dummy_hash,
        })
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Verify an email/password pair and issue an access token for the account.
    ///
    /// An unknown email and a wrong password fail identically with
    /// `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(User, IssuedToken), AuthError> {
        let email = email.trim().to_lowercase();
        let user = match self.users.find_user_by_email(&email).await? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => user,
            Some(_) => {
                warn!(email = %email, "login rejected: wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                let _ = self.hasher.verify(password, &self.dummy_hash);
                warn!(email = %email, "login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.jwt_service.create_access_token(user.id)?;
        info!(user_id = user.id, role = %user.role, "user logged in");

        Ok((user, token))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AuthError> {
        let (_, token) = self.authenticate(&request.email, &request.password).await?;
        Ok(token.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserRole;
    use crate::models::NewUser;
    use crate::store::InMemoryStore;
    use assert_matches::assert_matches;
    use chrono::Duration;

    async fn service_with_user(email: &str, password: &str) -> AuthService {
        let store = Arc::new(InMemoryStore::new());
        let hasher = PasswordHasher::new(4);
        store
            .create_user(NewUser {
                email: email.to_string(),
                name: "Coach".to_string(),
                password_hash: hasher.hash(password).unwrap(),
                role: UserRole::Coach,
                club_id: None,
            })
            .await
            .unwrap();

        AuthService::new(store, JwtService::new("secret", Duration::minutes(60)), hasher).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_issues_token_for_user() {
        let service = service_with_user("coach@x.com", "Serve#2024").await;

        let (user, token) = service.authenticate("coach@x.com", "Serve#2024").await.unwrap();
        assert_eq!(service.jwt().verify(&token.token).unwrap(), user.id.to_string());
        assert_eq!(token.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_fail_identically() {
        let service = service_with_user("coach@x.com", "Serve#2024").await;

        let unknown = service.authenticate("ghost@x.com", "Serve#2024").await.unwrap_err();
        let wrong = service.authenticate("coach@x.com", "wrong").await.unwrap_err();

        assert_matches!(unknown, AuthError::InvalidCredentials);
        assert_matches!(wrong, AuthError::InvalidCredentials);
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_login_returns_bearer_response() {
        let service = service_with_user("coach@x.com", "Serve#2024").await;

        let response = service
            .login(LoginRequest {
                email: "coach@x.com".to_string(),
                password: "Serve#2024".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.token_type, "bearer");
        assert!(!response.access_token.is_empty());
    }
}
