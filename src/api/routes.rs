use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::articles::article_routes;
use super::auth::auth_routes;
use super::clubs::club_routes;
use super::exercises::exercise_routes;
use super::health::health_check;
use super::suggestions::suggestion_routes;
use super::users::user_routes;
use crate::auth::middleware::{cors_layer, security_headers_layer};
use crate::auth::{AccessGuard, AuthError, AuthService, JwtService, PasswordHasher};
use crate::services::{ClubService, ContentService, SuggestionService, UserService};
use crate::store::Store;

/// Shared handler state. Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub guard: AccessGuard,
    pub users: UserService,
    pub clubs: ClubService,
    pub content: ContentService,
    pub suggestions: SuggestionService,
}

impl AppState {
    /// Wire every service to the same backing store.
    pub fn new<S>(store: Arc<S>, jwt_service: JwtService, hasher: PasswordHasher) -> Result<Self, AuthError>
    where
        S: Store + 'static,
    {
        Ok(Self {
            auth: AuthService::new(store.clone(), jwt_service.clone(), hasher)?,
            guard: AccessGuard::new(jwt_service, store.clone()),
            users: UserService::new(store.clone(), store.clone(), hasher),
            clubs: ClubService::new(store.clone(), store.clone()),
            content: ContentService::new(store.clone()),
            suggestions: SuggestionService::new(store),
        })
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for AccessGuard {
    fn from_ref(state: &AppState) -> Self {
        state.guard.clone()
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for ClubService {
    fn from_ref(state: &AppState) -> Self {
        state.clubs.clone()
    }
}

impl FromRef<AppState> for ContentService {
    fn from_ref(state: &AppState) -> Self {
        state.content.clone()
    }
}

impl FromRef<AppState> for SuggestionService {
    fn from_ref(state: &AppState) -> Self {
        state.suggestions.clone()
    }
}

pub fn create_routes(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes())
        .nest("/api/users", user_routes())
        .nest("/api/clubs", club_routes())
        .nest("/api/exercises", exercise_routes())
        .nest("/api/articles", article_routes())
        .nest("/api/suggestions", suggestion_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security_headers_layer())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}
