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
use crate::models::{
    Article, ArticleSuggestion, CreateArticle, Exercise, ExerciseSuggestion,
    SubmitExerciseSuggestion, SuggestionQuery,
};
use crate::services::SuggestionService;

/// Suggestion workflow routes.
///
/// Any contributor may submit; listing and resolving need a reviewer role.
pub fn suggestion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/exercises",
            get(list_exercise_suggestions).post(submit_exercise),
        )
        .route("/exercises/:id/approve", post(approve_exercise))
        .route("/exercises/:id/reject", post(reject_exercise))
        .route(
            "/articles",
            get(list_article_suggestions).post(submit_article),
        )
        .route("/articles/:id/approve", post(approve_article))
        .route("/articles/:id/reject", post(reject_article))
}

#[tracing::instrument(skip(suggestions, current, request))]
async fn submit_exercise(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiJson(request): ApiJson<SubmitExerciseSuggestion>,
) -> Result<(StatusCode, Json<ExerciseSuggestion>), ApiError> {
    let submitter = current.require(UserRole::CONTRIBUTORS)?;

    let suggestion = suggestions.submit_exercise(request, &submitter).await?;
    Ok((StatusCode::CREATED, Json(suggestion)))
}

#[tracing::instrument(skip(suggestions, current))]
async fn list_exercise_suggestions(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<SuggestionQuery>,
) -> Result<Json<Vec<ExerciseSuggestion>>, ApiError> {
    current.require(UserRole::REVIEWERS)?;

    Ok(Json(suggestions.list_exercise_suggestions(query.status).await?))
}

#[tracing::instrument(skip(suggestions, current))]
async fn approve_exercise(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Exercise>, ApiError> {
    let reviewer = current.require(UserRole::REVIEWERS)?;

    Ok(Json(suggestions.approve_exercise(id, &reviewer).await?))
}

#[tracing::instrument(skip(suggestions, current))]
async fn reject_exercise(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ExerciseSuggestion>, ApiError> {
    let reviewer = current.require(UserRole::REVIEWERS)?;

    Ok(Json(suggestions.reject_exercise(id, &reviewer).await?))
}

#[tracing::instrument(skip(suggestions, current, request))]
async fn submit_article(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiJson(request): ApiJson<CreateArticle>,
) -> Result<(StatusCode, Json<ArticleSuggestion>), ApiError> {
    let submitter = current.require(UserRole::CONTRIBUTORS)?;

    let suggestion = suggestions.submit_article(request, &submitter).await?;
    Ok((StatusCode::CREATED, Json(suggestion)))
}

#[tracing::instrument(skip(suggestions, current))]
async fn list_article_suggestions(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<SuggestionQuery>,
) -> Result<Json<Vec<ArticleSuggestion>>, ApiError> {
    current.require(UserRole::REVIEWERS)?;

    Ok(Json(suggestions.list_article_suggestions(query.status).await?))
}

#[tracing::instrument(skip(suggestions, current))]
async fn approve_article(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Article>, ApiError> {
    let reviewer = current.require(UserRole::REVIEWERS)?;

    Ok(Json(suggestions.approve_article(id, &reviewer).await?))
}

#[tracing::instrument(skip(suggestions, current))]
async fn reject_article(
    State(suggestions): State<SuggestionService>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ArticleSuggestion>, ApiError> {
    let reviewer = current.require(UserRole::REVIEWERS)?;

    Ok(Json(suggestions.reject_article(id, &reviewer).await?))
}
