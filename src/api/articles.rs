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
use crate::models::{Article, CreateArticle};
use crate::services::ContentService;

pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles).post(create_article))
        .route("/:id", get(get_article))
}

async fn list_articles(State(content): State<ContentService>) -> Result<Json<Vec<Article>>, ApiError> {
    Ok(Json(content.list_articles().await?))
}

async fn get_article(
    State(content): State<ContentService>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Article>, ApiError> {
    Ok(Json(content.get_article(id).await?))
}

#[tracing::instrument(skip(content, current, request))]
async fn create_article(
    State(content): State<ContentService>,
    current: CurrentUser,
    ApiJson(request): ApiJson<CreateArticle>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let author = current.require(UserRole::REVIEWERS)?;

    let article = content.create_article(request, &author).await?;
    Ok((StatusCode::CREATED, Json(article)))
}
