//! Persistence seam.
//!
//! Services talk to storage through the traits below. [`PgStore`] is the
//! production backend; [`InMemoryStore`] backs tests and local development.
//! Both run suggestion reviews as one atomic unit, which is the only
//! concurrency control the review workflow relies on.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::UserRole;
use crate::errors::ErrorKind;
use crate::models::{
    Article, ArticleSuggestion, Club, CreateArticle, CreateClub, Exercise, ExerciseFilter,
    ExerciseSuggestion, NewArticle, NewExercise, NewUser, SubmitExerciseSuggestion,
    SuggestionStatus, User,
};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PgStore;

/// Storage operation error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{entity} {id} was already {status}")]
    AlreadyResolved {
        entity: &'static str,
        id: i64,
        status: SuggestionStatus,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Storage error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::AlreadyResolved { .. } => ErrorKind::AlreadyResolved,
            StoreError::Conflict(_) => ErrorKind::Conflict,
            StoreError::Database(_) | StoreError::Migration(_) | StoreError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn list_users(&self, club_id: Option<i64>) -> Result<Vec<User>, StoreError>;
    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<User, StoreError>;
}

#[async_trait]
pub trait ClubStore: Send + Sync {
    /// Fails with `Conflict` when the name is taken.
    async fn create_club(&self, club: CreateClub) -> Result<Club, StoreError>;
    async fn find_club(&self, id: i64) -> Result<Option<Club>, StoreError>;
    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, StoreError>;
    async fn list_clubs(&self) -> Result<Vec<Club>, StoreError>;
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, StoreError>;
    async fn find_exercise(&self, id: i64) -> Result<Option<Exercise>, StoreError>;
    async fn list_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, StoreError>;
    async fn set_exercise_approver(&self, id: i64, approver_id: i64) -> Result<Exercise, StoreError>;
    async fn create_article(&self, article: NewArticle) -> Result<Article, StoreError>;
    async fn find_article(&self, id: i64) -> Result<Option<Article>, StoreError>;
    async fn list_articles(&self) -> Result<Vec<Article>, StoreError>;
}

#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn create_exercise_suggestion(
        &self,
        draft: SubmitExerciseSuggestion,
        submitted_by: i64,
    ) -> Result<ExerciseSuggestion, StoreError>;
    async fn list_exercise_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ExerciseSuggestion>, StoreError>;
    /// Atomically promote a pending suggestion into a canonical exercise and
    /// mark it approved by `reviewer_id`.
    async fn approve_exercise_suggestion(&self, id: i64, reviewer_id: i64) -> Result<Exercise, StoreError>;
    async fn reject_exercise_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<ExerciseSuggestion, StoreError>;

    async fn create_article_suggestion(
        &self,
        draft: CreateArticle,
        submitted_by: i64,
    ) -> Result<ArticleSuggestion, StoreError>;
    async fn list_article_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ArticleSuggestion>, StoreError>;
    /// Atomically promote a pending suggestion into a published article and
    /// mark it approved by `reviewer_id`.
    async fn approve_article_suggestion(&self, id: i64, reviewer_id: i64) -> Result<Article, StoreError>;
    async fn reject_article_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<ArticleSuggestion, StoreError>;
}

/// Everything the application needs from a backend.
pub trait Store: UserStore + ClubStore + ContentStore + SuggestionStore {}

impl<T> Store for T where T: UserStore + ClubStore + ContentStore + SuggestionStore {}
