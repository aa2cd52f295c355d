use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::models::{
    Article, ArticleSuggestion, CreateArticle, Exercise, ExerciseSuggestion,
    SubmitExerciseSuggestion, SuggestionStatus, User,
};
use crate::store::SuggestionStore;

/// Submission and review of exercise and article suggestions.
///
/// Role checks happen before these methods are called; the service only
/// records who submitted or reviewed. Each approve/reject is a single store
/// call, so the store's transaction is what keeps a suggestion from being
/// resolved twice.
#[derive(Clone)]
pub struct SuggestionService {
    store: Arc<dyn SuggestionStore>,
}

impl SuggestionService {
    pub fn new(store: Arc<dyn SuggestionStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, draft, submitter), fields(submitter_id = submitter.id))]
    pub async fn submit_exercise(
        &self,
        draft: SubmitExerciseSuggestion,
        submitter: &User,
    ) -> Result<ExerciseSuggestion, ApiError> {
        if draft.name.trim().is_empty() {
            return Err(ApiError::Validation("Exercise name is required".to_string()));
        }

        let suggestion = self.store.create_exercise_suggestion(draft, submitter.id).await?;
        info!(suggestion_id = suggestion.id, "exercise suggestion submitted");
        Ok(suggestion)
    }

    pub async fn list_exercise_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ExerciseSuggestion>, ApiError> {
        Ok(self.store.list_exercise_suggestions(status).await?)
    }

    #[instrument(skip(self, reviewer), fields(reviewer_id = reviewer.id))]
    pub async fn approve_exercise(&self, suggestion_id: i64, reviewer: &User) -> Result<Exercise, ApiError> {
        let exercise = self
            .store
            .approve_exercise_suggestion(suggestion_id, reviewer.id)
            .await?;
        info!(suggestion_id, exercise_id = exercise.id, "exercise suggestion approved");
        Ok(exercise)
    }

    #[instrument(skip(self, reviewer), fields(reviewer_id = reviewer.id))]
    pub async fn reject_exercise(
        &self,
        suggestion_id: i64,
        reviewer: &User,
    ) -> Result<ExerciseSuggestion, ApiError> {
        let suggestion = self
            .store
            .reject_exercise_suggestion(suggestion_id, reviewer.id)
            .await?;
        info!(suggestion_id, "exercise suggestion rejected");
        Ok(suggestion)
    }

    #[instrument(skip(self, draft, submitter), fields(submitter_id = submitter.id))]
    pub async fn submit_article(
        &self,
        draft: CreateArticle,
        submitter: &User,
    ) -> Result<ArticleSuggestion, ApiError> {
        if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
            return Err(ApiError::Validation(
                "Article title and content are required".to_string(),
            ));
        }

        let suggestion = self.store.create_article_suggestion(draft, submitter.id).await?;
        info!(suggestion_id = suggestion.id, "article suggestion submitted");
        Ok(suggestion)
    }

    pub async fn list_article_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ArticleSuggestion>, ApiError> {
        Ok(self.store.list_article_suggestions(status).await?)
    }

    #[instrument(skip(self, reviewer), fields(reviewer_id = reviewer.id))]
    pub async fn approve_article(&self, suggestion_id: i64, reviewer: &User) -> Result<Article, ApiError> {
        let article = self
            .store
            .approve_article_suggestion(suggestion_id, reviewer.id)
            .await?;
        info!(suggestion_id, article_id = article.id, "article suggestion approved");
        Ok(article)
    }

    #[instrument(skip(self, reviewer), fields(reviewer_id = reviewer.id))]
    pub async fn reject_article(
        &self,
        suggestion_id: i64,
        reviewer: &User,
    ) -> Result<ArticleSuggestion, ApiError> {
        let suggestion = self
            .store
            .reject_article_suggestion(suggestion_id, reviewer.id)
            .await?;
        info!(suggestion_id, "article suggestion rejected");
        Ok(suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserRole;
    use crate::store::{ContentStore, InMemoryStore};
    use crate::ErrorKind;
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            email: format!("user{id}@x.com"),
            name: format!("User {id}"),
            password_hash: String::new(),
            role,
            club_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_submit_always_creates_pending() {
        let service = SuggestionService::new(Arc::new(InMemoryStore::new()));
        let coach = user(3, UserRole::Coach);
        let draft = SubmitExerciseSuggestion {
            name: "Pepper".to_string(),
            ..SubmitExerciseSuggestion::default()
        };

        let first = service.submit_exercise(draft.clone(), &coach).await.unwrap();
        let second = service.submit_exercise(draft, &coach).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.status, SuggestionStatus::Pending);
        assert_eq!(second.status, SuggestionStatus::Pending);
        assert_eq!(first.submitted_by, 3);
    }

    #[tokio::test]
    async fn test_submit_requires_name() {
        let service = SuggestionService::new(Arc::new(InMemoryStore::new()));
        let err = service
            .submit_exercise(SubmitExerciseSuggestion::default(), &user(3, UserRole::Coach))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_approve_twice_fails_without_second_record() {
        let store = Arc::new(InMemoryStore::new());
        let service = SuggestionService::new(store.clone());
        let coach = user(3, UserRole::Coach);
        let reviewer = user(7, UserRole::FederationAdmin);

        let suggestion = service
            .submit_article(
                CreateArticle {
                    title: "Blocking footwork".to_string(),
                    content: "Crossover step drills.".to_string(),
                },
                &coach,
            )
            .await
            .unwrap();

        let article = service.approve_article(suggestion.id, &reviewer).await.unwrap();
        assert_eq!(article.created_by, 3);
        assert_eq!(article.approved_by, Some(7));

        let err = service.approve_article(suggestion.id, &reviewer).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyResolved);
        assert_eq!(store.list_articles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reject_unknown_suggestion() {
        let service = SuggestionService::new(Arc::new(InMemoryStore::new()));
        let err = service
            .reject_exercise(404, &user(7, UserRole::FederationAdmin))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
