use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::AppState;
use crate::auth::{CurrentUser, UserRole};
use crate::errors::ApiError;
use crate::models::{CreateUser, UpdateUserRole, UserResponse};
use crate::services::UserService;

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub club_id: Option<i64>,
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user))
        .route("/:id/role", put(change_role))
}

#[tracing::instrument(skip(users, current))]
async fn list_users(
    State(users): State<UserService>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    current.require(UserRole::REVIEWERS)?;

    let users = users.list_users(query.club_id).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[tracing::instrument(skip(users, current, request))]
async fn create_user(
    State(users): State<UserService>,
    current: CurrentUser,
    ApiJson(request): ApiJson<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let actor = current.require(UserRole::REVIEWERS)?;

    let user = users.create_user(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[tracing::instrument(skip(users, current))]
async fn get_user(
    State(users): State<UserService>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    current.require(UserRole::REVIEWERS)?;

    let user = users.get_user(id).await?;
    Ok(Json(user.into()))
}

#[tracing::instrument(skip(users, current, request))]
async fn change_role(
    State(users): State<UserService>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateUserRole>,
) -> Result<Json<UserResponse>, ApiError> {
    let actor = current.require(UserRole::PLATFORM_ADMINS)?;

    let user = users.change_role(&actor, id, request.role).await?;
    Ok(Json(user.into()))
}
