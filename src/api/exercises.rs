use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::AppState;
use crate::auth::{CurrentUser, UserRole};
use crate::errors::ApiError;
use crate::models::{CreateExercise, Exercise, ExerciseFilter};
use crate::services::ContentService;

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route("/:id", get(get_exercise))
        .route("/:id/approve", post(approve_exercise))
}

/// Exercise library, optionally filtered by category, intensity and age group
async fn list_exercises(
    State(content): State<ContentService>,
    ApiQuery(filter): ApiQuery<ExerciseFilter>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    Ok(Json(content.list_exercises(&filter).await?))
}

async fn get_exercise(
    State(content): State<ContentService>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Exercise>, ApiError> {
    Ok(Json(content.get_exercise(id).await?))
}

#[tracing::instrument(skip(content, current, request))]
async fn create_exercise(
    State(content): State<ContentService>,
    current: CurrentUser,
    ApiJson(request): ApiJson<CreateExercise>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    let creator = current.require(UserRole::REVIEWERS)?;

    let exercise = content.create_exercise(request, &creator).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

#[tracing::instrument(skip(content, current))]
async fn approve_exercise(
    State(content): State<ContentService>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Exercise>, ApiError> {
    let approver = current.require(UserRole::REVIEWERS)?;

    Ok(Json(content.approve_exercise(id, &approver).await?))
}
