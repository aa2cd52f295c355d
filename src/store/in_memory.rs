use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::UserRole;
use crate::models::{
    Article, ArticleSuggestion, Club, CreateArticle, CreateClub, Exercise, ExerciseFilter,
    ExerciseSuggestion, NewArticle, NewExercise, NewUser, ReviewDecision,
    SubmitExerciseSuggestion, SuggestionStatus, User, PUBLISHED,
};

use super::{ClubStore, ContentStore, StoreError, SuggestionStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    clubs: BTreeMap<i64, Club>,
    exercises: BTreeMap<i64, Exercise>,
    articles: BTreeMap<i64, Article>,
    exercise_suggestions: BTreeMap<i64, ExerciseSuggestion>,
    article_suggestions: BTreeMap<i64, ArticleSuggestion>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_exercise(&mut self, new: NewExercise) -> Exercise {
        let id = self.allocate_id();
        let fields = new.fields;
        let exercise = Exercise {
            id,
            name: fields.name,
            main_category: fields.main_category,
            sub_category: fields.sub_category,
            level: fields.level,
            goal: fields.goal,
            description: fields.description,
            players_required: fields.players_required,
            intensity: fields.intensity,
            duration_min: fields.duration_min,
            duration_max: fields.duration_max,
            tags: fields.tags,
            age_groups: fields.age_groups,
            image_urls: fields.image_urls,
            video_urls: fields.video_urls,
            created_by: new.created_by,
            approved_by: new.approved_by,
            created_at: Utc::now(),
        };
        self.exercises.insert(id, exercise.clone());
        exercise
    }

    fn insert_article(&mut self, new: NewArticle) -> Article {
        let id = self.allocate_id();
        let article = Article {
            id,
            title: new.title,
            content: new.content,
            status: PUBLISHED.to_string(),
            created_by: new.created_by,
            approved_by: new.approved_by,
            created_at: Utc::now(),
        };
        self.articles.insert(id, article.clone());
        article
    }

    fn review_exercise_suggestion(
        &mut self,
        id: i64,
        reviewer_id: i64,
        decision: ReviewDecision,
    ) -> Result<ExerciseSuggestion, StoreError> {
        let suggestion = self
            .exercise_suggestions
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Exercise suggestion", id })?;

        suggestion.status = suggestion
            .status
            .review(decision)
            .map_err(|resolved| StoreError::AlreadyResolved {
                entity: "Exercise suggestion",
                id,
                status: resolved.0,
            })?;
        suggestion.reviewed_by = Some(reviewer_id);
        suggestion.reviewed_at = Some(Utc::now());

        Ok(suggestion.clone())
    }

    fn review_article_suggestion(
        &mut self,
        id: i64,
        reviewer_id: i64,
        decision: ReviewDecision,
    ) -> Result<ArticleSuggestion, StoreError> {
        let suggestion = self
            .article_suggestions
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Article suggestion", id })?;

        suggestion.status = suggestion
            .status
            .review(decision)
            .map_err(|resolved| StoreError::AlreadyResolved {
                entity: "Article suggestion",
                id,
                status: resolved.0,
            })?;
        suggestion.reviewed_by = Some(reviewer_id);
        suggestion.reviewed_at = Some(Utc::now());

        Ok(suggestion.clone())
    }
}

/// In-memory store.
///
/// Intended for tests/dev. A single lock guards every table, so each call is
/// atomic with respect to every other call.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut tables = self.write()?;

        if tables.users.values().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict(format!("Email {} is already registered", new.email)));
        }
        if let Some(club_id) = new.club_id {
            if !tables.clubs.contains_key(&club_id) {
                return Err(StoreError::NotFound { entity: "Club", id: club_id });
            }
        }

        let id = tables.allocate_id();
        let now = Utc::now();
        let user = User {
            id,
            email: new.email,
            name: new.name,
            password_hash: new.password_hash,
            role: new.role,
            club_id: new.club_id,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, club_id: Option<i64>) -> Result<Vec<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .filter(|u| club_id.map_or(true, |c| u.club_id == Some(c)))
            .cloned()
            .collect())
    }

    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<User, StoreError> {
        let mut tables = self.write()?;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "User", id })?;

        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl ClubStore for InMemoryStore {
    async fn create_club(&self, club: CreateClub) -> Result<Club, StoreError> {
        let mut tables = self.write()?;

        if tables.clubs.values().any(|c| c.name == club.name) {
            return Err(StoreError::Conflict(format!("Club {} already exists", club.name)));
        }

        let id = tables.allocate_id();
        let now = Utc::now();
        let club = Club {
            id,
            name: club.name,
            city: club.city,
            country: club.country,
            address: club.address,
            contact_email: club.contact_email,
            contact_phone: club.contact_phone,
            website_url: club.website_url,
            logo_url: club.logo_url,
            created_at: now,
            updated_at: now,
        };
        tables.clubs.insert(id, club.clone());
        Ok(club)
    }

    async fn find_club(&self, id: i64) -> Result<Option<Club>, StoreError> {
        Ok(self.read()?.clubs.get(&id).cloned())
    }

    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, StoreError> {
        Ok(self.read()?.clubs.values().find(|c| c.name == name).cloned())
    }

    async fn list_clubs(&self) -> Result<Vec<Club>, StoreError> {
        let mut clubs: Vec<Club> = self.read()?.clubs.values().cloned().collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clubs)
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, StoreError> {
        Ok(self.write()?.insert_exercise(exercise))
    }

    async fn find_exercise(&self, id: i64) -> Result<Option<Exercise>, StoreError> {
        Ok(self.read()?.exercises.get(&id).cloned())
    }

    async fn list_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, StoreError> {
        Ok(self
            .read()?
            .exercises
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn set_exercise_approver(&self, id: i64, approver_id: i64) -> Result<Exercise, StoreError> {
        let mut tables = self.write()?;
        let exercise = tables
            .exercises
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Exercise", id })?;

        exercise.approved_by = Some(approver_id);
        Ok(exercise.clone())
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article, StoreError> {
        Ok(self.write()?.insert_article(article))
    }

    async fn find_article(&self, id: i64) -> Result<Option<Article>, StoreError> {
        Ok(self.read()?.articles.get(&id).cloned())
    }

    async fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        Ok(self.read()?.articles.values().cloned().collect())
    }
}

#[async_trait]
impl SuggestionStore for InMemoryStore {
    async fn create_exercise_suggestion(
        &self,
        draft: SubmitExerciseSuggestion,
        submitted_by: i64,
    ) -> Result<ExerciseSuggestion, StoreError> {
        let mut tables = self.write()?;
        let id = tables.allocate_id();
        let suggestion = ExerciseSuggestion {
            id,
            name: draft.name,
            main_category: draft.main_category,
            description: draft.description,
            submitted_by,
            status: SuggestionStatus::Pending,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        };
        tables.exercise_suggestions.insert(id, suggestion.clone());
        Ok(suggestion)
    }

    async fn list_exercise_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ExerciseSuggestion>, StoreError> {
        Ok(self
            .read()?
            .exercise_suggestions
            .values()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .cloned()
            .collect())
    }

    async fn approve_exercise_suggestion(&self, id: i64, reviewer_id: i64) -> Result<Exercise, StoreError> {
        let mut tables = self.write()?;
        let suggestion = tables.review_exercise_suggestion(id, reviewer_id, ReviewDecision::Approve)?;
        Ok(tables.insert_exercise(suggestion.promote(reviewer_id)))
    }

    async fn reject_exercise_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<ExerciseSuggestion, StoreError> {
        self.write()?
            .review_exercise_suggestion(id, reviewer_id, ReviewDecision::Reject)
    }

    async fn create_article_suggestion(
        &self,
        draft: CreateArticle,
        submitted_by: i64,
    ) -> Result<ArticleSuggestion, StoreError> {
        let mut tables = self.write()?;
        let id = tables.allocate_id();
        let suggestion = ArticleSuggestion {
            id,
            title: draft.title,
            content: draft.content,
            submitted_by,
            status: SuggestionStatus::Pending,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        };
        tables.article_suggestions.insert(id, suggestion.clone());
        Ok(suggestion)
    }

    async fn list_article_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ArticleSuggestion>, StoreError> {
        Ok(self
            .read()?
            .article_suggestions
            .values()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .cloned()
            .collect())
    }

    async fn approve_article_suggestion(&self, id: i64, reviewer_id: i64) -> Result<Article, StoreError> {
        let mut tables = self.write()?;
        let suggestion = tables.review_article_suggestion(id, reviewer_id, ReviewDecision::Approve)?;
        Ok(tables.insert_article(suggestion.promote(reviewer_id)))
    }

    async fn reject_article_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<ArticleSuggestion, StoreError> {
        self.write()?
            .review_article_suggestion(id, reviewer_id, ReviewDecision::Reject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Coach".to_string(),
            password_hash: "$2b$04$placeholder".to_string(),
            role: UserRole::Coach,
            club_id: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        store.create_user(new_user("a@x.com")).await.unwrap();

        assert_matches!(
            store.create_user(new_user("a@x.com")).await,
            Err(StoreError::Conflict(_))
        );
    }

    #[tokio::test]
    async fn test_duplicate_club_name_conflicts() {
        let store = InMemoryStore::new();
        let club = CreateClub {
            name: "Levski".to_string(),
            ..CreateClub::default()
        };
        store.create_club(club.clone()).await.unwrap();

        assert_matches!(store.create_club(club).await, Err(StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_rejected_suggestion_creates_no_record() {
        let store = InMemoryStore::new();
        let draft = SubmitExerciseSuggestion {
            name: "Wall passing".to_string(),
            ..SubmitExerciseSuggestion::default()
        };
        let suggestion = store.create_exercise_suggestion(draft, 1).await.unwrap();

        let rejected = store.reject_exercise_suggestion(suggestion.id, 2).await.unwrap();
        assert_eq!(rejected.status, SuggestionStatus::Rejected);
        assert_eq!(rejected.reviewed_by, Some(2));
        assert!(store.list_exercises(&ExerciseFilter::default()).await.unwrap().is_empty());

        assert_matches!(
            store.approve_exercise_suggestion(suggestion.id, 2).await,
            Err(StoreError::AlreadyResolved { status: SuggestionStatus::Rejected, .. })
        );
    }
}
