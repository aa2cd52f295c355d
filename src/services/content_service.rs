use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::models::{
    Article, CreateArticle, CreateExercise, Exercise, ExerciseFilter, NewArticle, NewExercise, User,
};
use crate::store::{ContentStore, StoreError};

/// Canonical exercise library and article feed.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn list_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, ApiError> {
        Ok(self.store.list_exercises(filter).await?)
    }

    pub async fn get_exercise(&self, id: i64) -> Result<Exercise, ApiError> {
        self.store
            .find_exercise(id)
            .await?
            .ok_or_else(|| StoreError::NotFound { entity: "Exercise", id }.into())
    }

    /// Add an exercise directly to the library. The creator is also recorded
    /// as the approver.
    #[instrument(skip(self, exercise, creator), fields(creator_id = creator.id))]
    pub async fn create_exercise(&self, exercise: CreateExercise, creator: &User) -> Result<Exercise, ApiError> {
        validate_exercise(&exercise)?;

        let exercise = self
            .store
            .create_exercise(NewExercise {
                fields: exercise,
                created_by: Some(creator.id),
                approved_by: Some(creator.id),
            })
            .await?;
        info!(exercise_id = exercise.id, "exercise created");
        Ok(exercise)
    }

    #[instrument(skip(self, approver), fields(approver_id = approver.id))]
    pub async fn approve_exercise(&self, id: i64, approver: &User) -> Result<Exercise, ApiError> {
        let exercise = self.store.set_exercise_approver(id, approver.id).await?;
        info!(exercise_id = id, "exercise approved");
        Ok(exercise)
    }

    pub async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
        Ok(self.store.list_articles().await?)
    }

    pub async fn get_article(&self, id: i64) -> Result<Article, ApiError> {
        self.store
            .find_article(id)
            .await?
            .ok_or_else(|| StoreError::NotFound { entity: "Article", id }.into())
    }

    #[instrument(skip(self, article, author), fields(author_id = author.id))]
    pub async fn create_article(&self, article: CreateArticle, author: &User) -> Result<Article, ApiError> {
        if article.title.trim().is_empty() || article.content.trim().is_empty() {
            return Err(ApiError::Validation(
                "Article title and content are required".to_string(),
            ));
        }

        let article = self
            .store
            .create_article(NewArticle {
                title: article.title,
                content: article.content,
                created_by: author.id,
                approved_by: Some(author.id),
            })
            .await?;
        info!(article_id = article.id, "article published");
        Ok(article)
    }
}

fn validate_exercise(exercise: &CreateExercise) -> Result<(), ApiError> {
    if exercise.name.trim().is_empty() {
        return Err(ApiError::Validation("Exercise name is required".to_string()));
    }
    if exercise.main_category.trim().is_empty() {
        return Err(ApiError::Validation("Exercise category is required".to_string()));
    }
    if let (Some(min), Some(max)) = (exercise.duration_min, exercise.duration_max) {
        if min > max {
            return Err(ApiError::Validation(
                "duration_min must not exceed duration_max".to_string(),
            ));
        }
    }
    Ok(())
}
