use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::password::validate_password_strength;
use crate::auth::{AuthError, PasswordHasher, PasswordPolicy, UserRole};
use crate::errors::ApiError;
use crate::models::{CreateUser, NewUser, User};
use crate::store::{ClubStore, StoreError, UserStore};

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Account management for privileged users.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    clubs: Arc<dyn ClubStore>,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, clubs: Arc<dyn ClubStore>, hasher: PasswordHasher) -> Self {
        Self {
            users,
            clubs,
            hasher,
            policy: PasswordPolicy::default(),
        }
    }

    /// Create an account on behalf of `actor`.
    ///
    /// Admin-class accounts can only be created by a platform admin.
    #[instrument(skip(self, actor, request), fields(actor_id = actor.id, email = %request.email))]
    pub async fn create_user(&self, actor: &User, request: CreateUser) -> Result<User, ApiError> {
        if request.role.is_admin() && actor.role != UserRole::PlatformAdmin {
            warn!(role = %request.role, "only platform admins may create admin accounts");
            return Err(AuthError::Forbidden.into());
        }

        self.register(request).await
    }

    /// Validate, hash and persist a new account without an acting user.
    ///
    /// Used by seeding; request handlers go through [`UserService::create_user`].
    pub async fn register(&self, request: CreateUser) -> Result<User, ApiError> {
        let email = request.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(ApiError::Validation(format!("Invalid email address: {}", request.email)));
        }
        if request.name.trim().is_empty() {
            return Err(ApiError::Validation("Name is required".to_string()));
        }
        validate_password_strength(&request.password, &self.policy)
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        if let Some(club_id) = request.club_id {
            if self.clubs.find_club(club_id).await?.is_none() {
                return Err(StoreError::NotFound { entity: "Club", id: club_id }.into());
            }
        }

        let password_hash = self.hasher.hash(&request.password).map_err(AuthError::from)?;

        let user = self
            .users
            .create_user(NewUser {
                email,
                name: request.name.trim().to_string(),
                password_hash,
                role: request.role,
                club_id: request.club_id,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.users
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound { entity: "User", id }.into())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self.users.find_user_by_email(&email.trim().to_lowercase()).await?)
    }

    pub async fn list_users(&self, club_id: Option<i64>) -> Result<Vec<User>, ApiError> {
        Ok(self.users.list_users(club_id).await?)
    }

    /// Change another user's role. Nobody may change their own role.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn change_role(&self, actor: &User, user_id: i64, role: UserRole) -> Result<User, ApiError> {
        if actor.id == user_id {
            warn!("users cannot change their own role");
            return Err(AuthError::Forbidden.into());
        }

        let user = self.users.update_user_role(user_id, role).await?;
        info!(user_id, role = %user.role, "user role changed");
        Ok(user)
    }
}
