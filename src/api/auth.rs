use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::extract::ApiJson;
use crate::api::AppState;
use crate::auth::{AuthService, CurrentUser, LoginRequest, TokenResponse};
use crate::errors::ApiError;
use crate::models::UserResponse;

/// Authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(current_user))
}

/// Login with email and password
#[tracing::instrument(skip(auth_service, request), fields(email = %request.email))]
async fn login(
    State(auth_service): State<AuthService>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

/// Public profile of the caller
async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
