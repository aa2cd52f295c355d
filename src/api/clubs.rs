use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extract::{ApiJson, ApiPath};
use crate::api::AppState;
use crate::auth::{CurrentUser, UserRole};
use crate::errors::ApiError;
use crate::models::{Club, ClubDetail, CreateClub};
use crate::services::ClubService;

pub fn club_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clubs).post(create_club))
        .route("/:id", get(get_club))
}

async fn list_clubs(State(clubs): State<ClubService>) -> Result<Json<Vec<Club>>, ApiError> {
    Ok(Json(clubs.list_clubs().await?))
}

#[tracing::instrument(skip(clubs, current, request))]
async fn create_club(
    State(clubs): State<ClubService>,
    current: CurrentUser,
    ApiJson(request): ApiJson<CreateClub>,
) -> Result<(StatusCode, Json<Club>), ApiError> {
    current.require(UserRole::REVIEWERS)?;

    let club = clubs.create_club(request).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

async fn get_club(
    State(clubs): State<ClubService>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ClubDetail>, ApiError> {
    Ok(Json(clubs.get_club(id).await?))
}
