//! Postgres-backed store.
//!
//! Queries are built at runtime (`query_as` + `FromRow` rows) so the crate
//! compiles without a live database. Enumerations are stored as TEXT and
//! parsed on the way out; string lists are JSONB arrays.
//!
//! Suggestion reviews run in a single transaction that locks the suggestion
//! row with `SELECT ... FOR UPDATE`, checks it is still pending, inserts the
//! canonical record and stamps the suggestion. Two reviewers racing on the
//! same suggestion serialize on the row lock; the loser sees a terminal
//! status and gets `AlreadyResolved`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgConnection, PgPool};
use tracing::instrument;

use crate::auth::UserRole;
use crate::models::{
    Article, ArticleSuggestion, Club, CreateArticle, CreateClub, Exercise, ExerciseFilter,
    ExerciseSuggestion, NewArticle, NewExercise, NewUser, ReviewDecision,
    SubmitExerciseSuggestion, SuggestionStatus, User, PUBLISHED,
};

use super::{ClubStore, ContentStore, StoreError, SuggestionStore, UserStore};

const USER_COLUMNS: &str = "id, email, name, password_hash, role, club_id, created_at, updated_at";
const CLUB_COLUMNS: &str = "id, name, city, country, address, contact_email, contact_phone, \
     website_url, logo_url, created_at, updated_at";
const EXERCISE_COLUMNS: &str = "id, name, main_category, sub_category, level, goal, description, \
     players_required, intensity, duration_min, duration_max, tags, age_groups, image_urls, \
     video_urls, created_by, approved_by, created_at";
const EXERCISE_SUGGESTION_COLUMNS: &str = "id, name, main_category, description, submitted_by, \
     status, created_at, reviewed_by, reviewed_at";
const ARTICLE_COLUMNS: &str = "id, title, content, status, created_by, approved_by, created_at";
const ARTICLE_SUGGESTION_COLUMNS: &str = "id, title, content, submitted_by, status, created_at, \
     reviewed_by, reviewed_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    password_hash: String,
    role: String,
    club_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<UserRole>()
            .map_err(|e| StoreError::Internal(format!("user {}: {e}", row.id)))?;

        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            role,
            club_id: row.club_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ExerciseRow {
    id: i64,
    name: String,
    main_category: String,
    sub_category: Option<String>,
    level: Option<String>,
    goal: Option<String>,
    description: Option<String>,
    players_required: Option<i32>,
    intensity: Option<String>,
    duration_min: Option<i32>,
    duration_max: Option<i32>,
    tags: Json<Vec<String>>,
    age_groups: Json<Vec<String>>,
    image_urls: Json<Vec<String>>,
    video_urls: Json<Vec<String>>,
    created_by: Option<i64>,
    approved_by: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Exercise {
            id: row.id,
            name: row.name,
            main_category: row.main_category,
            sub_category: row.sub_category,
            level: row.level,
            goal: row.goal,
            description: row.description,
            players_required: row.players_required,
            intensity: row.intensity,
            duration_min: row.duration_min,
            duration_max: row.duration_max,
            tags: row.tags.0,
            age_groups: row.age_groups.0,
            image_urls: row.image_urls.0,
            video_urls: row.video_urls.0,
            created_by: row.created_by,
            approved_by: row.approved_by,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ExerciseSuggestionRow {
    id: i64,
    name: String,
    main_category: Option<String>,
    description: Option<String>,
    submitted_by: i64,
    status: String,
    created_at: DateTime<Utc>,
    reviewed_by: Option<i64>,
    reviewed_at: Option<DateTime<Utc>>,
}

impl TryFrom<ExerciseSuggestionRow> for ExerciseSuggestion {
    type Error = StoreError;

    fn try_from(row: ExerciseSuggestionRow) -> Result<Self, Self::Error> {
        Ok(ExerciseSuggestion {
            status: parse_status(&row.status)?,
            id: row.id,
            name: row.name,
            main_category: row.main_category,
            description: row.description,
            submitted_by: row.submitted_by,
            created_at: row.created_at,
            reviewed_by: row.reviewed_by,
            reviewed_at: row.reviewed_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ArticleSuggestionRow {
    id: i64,
    title: String,
    content: String,
    submitted_by: i64,
    status: String,
    created_at: DateTime<Utc>,
    reviewed_by: Option<i64>,
    reviewed_at: Option<DateTime<Utc>>,
}

impl TryFrom<ArticleSuggestionRow> for ArticleSuggestion {
    type Error = StoreError;

    fn try_from(row: ArticleSuggestionRow) -> Result<Self, Self::Error> {
        Ok(ArticleSuggestion {
            status: parse_status(&row.status)?,
            id: row.id,
            title: row.title,
            content: row.content,
            submitted_by: row.submitted_by,
            created_at: row.created_at,
            reviewed_by: row.reviewed_by,
            reviewed_at: row.reviewed_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    status: String,
    created_by: i64,
    approved_by: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            title: row.title,
            content: row.content,
            status: row.status,
            created_by: row.created_by,
            approved_by: row.approved_by,
            created_at: row.created_at,
        }
    }
}

fn parse_status(raw: &str) -> Result<SuggestionStatus, StoreError> {
    raw.parse().map_err(StoreError::Internal)
}

/// Map SQLx errors onto the store taxonomy.
///
/// | Postgres code | Meaning | StoreError |
/// |---------------|---------|------------|
/// | `23505` | unique violation | `Conflict` |
/// | `23503` | foreign key violation | `Conflict` |
/// | other | | `Database` |
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some("23505") => {
                return StoreError::Conflict(format!("{operation}: {}", db_err.message()));
            }
            Some("23503") => {
                return StoreError::Conflict(format!(
                    "{operation}: referenced record does not exist"
                ));
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

/// Postgres implementation of every store trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

async fn insert_exercise(conn: &mut PgConnection, new: NewExercise) -> Result<Exercise, StoreError> {
    let fields = new.fields;
    let sql = format!(
        "INSERT INTO exercises (name, main_category, sub_category, level, goal, description, \
         players_required, intensity, duration_min, duration_max, tags, age_groups, image_urls, \
         video_urls, created_by, approved_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         RETURNING {EXERCISE_COLUMNS}"
    );

    let row = sqlx::query_as::<_, ExerciseRow>(&sql)
        .bind(fields.name)
        .bind(fields.main_category)
        .bind(fields.sub_category)
        .bind(fields.level)
        .bind(fields.goal)
        .bind(fields.description)
        .bind(fields.players_required)
        .bind(fields.intensity)
        .bind(fields.duration_min)
        .bind(fields.duration_max)
        .bind(Json(fields.tags))
        .bind(Json(fields.age_groups))
        .bind(Json(fields.image_urls))
        .bind(Json(fields.video_urls))
        .bind(new.created_by)
        .bind(new.approved_by)
        .fetch_one(conn)
        .await
        .map_err(|e| map_sqlx_error("insert_exercise", e))?;

    Ok(row.into())
}

async fn insert_article(conn: &mut PgConnection, new: NewArticle) -> Result<Article, StoreError> {
    let sql = format!(
        "INSERT INTO articles (title, content, status, created_by, approved_by) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {ARTICLE_COLUMNS}"
    );

    let row = sqlx::query_as::<_, ArticleRow>(&sql)
        .bind(new.title)
        .bind(new.content)
        .bind(PUBLISHED)
        .bind(new.created_by)
        .bind(new.approved_by)
        .fetch_one(conn)
        .await
        .map_err(|e| map_sqlx_error("insert_article", e))?;

    Ok(row.into())
}

/// Lock an exercise suggestion, apply the decision and persist the new status.
async fn review_exercise_suggestion(
    conn: &mut PgConnection,
    id: i64,
    reviewer_id: i64,
    decision: ReviewDecision,
) -> Result<ExerciseSuggestion, StoreError> {
    let row = sqlx::query_as::<_, ExerciseSuggestionRow>(&format!(
        "SELECT {EXERCISE_SUGGESTION_COLUMNS} FROM exercise_suggestions WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| map_sqlx_error("lock_exercise_suggestion", e))?
    .ok_or(StoreError::NotFound { entity: "Exercise suggestion", id })?;

    let current = parse_status(&row.status)?;
    let next = current.review(decision).map_err(|resolved| StoreError::AlreadyResolved {
        entity: "Exercise suggestion",
        id,
        status: resolved.0,
    })?;

    let row = sqlx::query_as::<_, ExerciseSuggestionRow>(&format!(
        "UPDATE exercise_suggestions SET status = $2, reviewed_by = $3, reviewed_at = NOW() \
         WHERE id = $1 RETURNING {EXERCISE_SUGGESTION_COLUMNS}"
    ))
    .bind(id)
    .bind(next.as_str())
    .bind(reviewer_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| map_sqlx_error("update_exercise_suggestion", e))?;

    row.try_into()
}

async fn review_article_suggestion(
    conn: &mut PgConnection,
    id: i64,
    reviewer_id: i64,
    decision: ReviewDecision,
) -> Result<ArticleSuggestion, StoreError> {
    let row = sqlx::query_as::<_, ArticleSuggestionRow>(&format!(
        "SELECT {ARTICLE_SUGGESTION_COLUMNS} FROM article_suggestions WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| map_sqlx_error("lock_article_suggestion", e))?
    .ok_or(StoreError::NotFound { entity: "Article suggestion", id })?;

    let current = parse_status(&row.status)?;
    let next = current.review(decision).map_err(|resolved| StoreError::AlreadyResolved {
        entity: "Article suggestion",
        id,
        status: resolved.0,
    })?;

    let row = sqlx::query_as::<_, ArticleSuggestionRow>(&format!(
        "UPDATE article_suggestions SET status = $2, reviewed_by = $3, reviewed_at = NOW() \
         WHERE id = $1 RETURNING {ARTICLE_SUGGESTION_COLUMNS}"
    ))
    .bind(id)
    .bind(next.as_str())
    .bind(reviewer_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| map_sqlx_error("update_article_suggestion", e))?;

    row.try_into()
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, name, password_hash, role, club_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.club_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_user", e))?;

        row.try_into()
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_id", e))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_email", e))?
            .map(User::try_from)
            .transpose()
    }

    async fn list_users(&self, club_id: Option<i64>) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE ($1::BIGINT IS NULL OR club_id = $1) ORDER BY id"
        ))
        .bind(club_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_users", e))?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    #[instrument(skip(self))]
    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<User, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_user_role", e))?
        .ok_or(StoreError::NotFound { entity: "User", id })?
        .try_into()
    }
}

#[async_trait]
impl ClubStore for PgStore {
    #[instrument(skip(self, club), fields(name = %club.name))]
    async fn create_club(&self, club: CreateClub) -> Result<Club, StoreError> {
        sqlx::query_as::<_, Club>(&format!(
            "INSERT INTO clubs (name, city, country, address, contact_email, contact_phone, \
             website_url, logo_url) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CLUB_COLUMNS}"
        ))
        .bind(club.name)
        .bind(club.city)
        .bind(club.country)
        .bind(club.address)
        .bind(club.contact_email)
        .bind(club.contact_phone)
        .bind(club.website_url)
        .bind(club.logo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_club", e))
    }

    async fn find_club(&self, id: i64) -> Result<Option<Club>, StoreError> {
        sqlx::query_as::<_, Club>(&format!("SELECT {CLUB_COLUMNS} FROM clubs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_club", e))
    }

    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, StoreError> {
        sqlx::query_as::<_, Club>(&format!("SELECT {CLUB_COLUMNS} FROM clubs WHERE name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_club_by_name", e))
    }

    async fn list_clubs(&self) -> Result<Vec<Club>, StoreError> {
        sqlx::query_as::<_, Club>(&format!("SELECT {CLUB_COLUMNS} FROM clubs ORDER BY name"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_clubs", e))
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("acquire_connection", e))?;
        insert_exercise(&mut conn, exercise).await
    }

    async fn find_exercise(&self, id: i64) -> Result<Option<Exercise>, StoreError> {
        let row = sqlx::query_as::<_, ExerciseRow>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_exercise", e))?;

        Ok(row.map(Exercise::from))
    }

    async fn list_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, StoreError> {
        let rows = sqlx::query_as::<_, ExerciseRow>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises \
             WHERE ($1::TEXT IS NULL OR main_category = $1) \
               AND ($2::TEXT IS NULL OR intensity = $2) \
               AND ($3::TEXT IS NULL OR age_groups ? $3) \
             ORDER BY id"
        ))
        .bind(filter.category.as_deref())
        .bind(filter.intensity.as_deref())
        .bind(filter.age.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_exercises", e))?;

        Ok(rows.into_iter().map(Exercise::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_exercise_approver(&self, id: i64, approver_id: i64) -> Result<Exercise, StoreError> {
        let row = sqlx::query_as::<_, ExerciseRow>(&format!(
            "UPDATE exercises SET approved_by = $2 WHERE id = $1 RETURNING {EXERCISE_COLUMNS}"
        ))
        .bind(id)
        .bind(approver_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("set_exercise_approver", e))?
        .ok_or(StoreError::NotFound { entity: "Exercise", id })?;

        Ok(row.into())
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("acquire_connection", e))?;
        insert_article(&mut conn, article).await
    }

    async fn find_article(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_article", e))?;

        Ok(row.map(Article::from))
    }

    async fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_articles", e))?;

        Ok(rows.into_iter().map(Article::from).collect())
    }
}

#[async_trait]
impl SuggestionStore for PgStore {
    #[instrument(skip(self, draft))]
    async fn create_exercise_suggestion(
        &self,
        draft: SubmitExerciseSuggestion,
        submitted_by: i64,
    ) -> Result<ExerciseSuggestion, StoreError> {
        sqlx::query_as::<_, ExerciseSuggestionRow>(&format!(
            "INSERT INTO exercise_suggestions (name, main_category, description, submitted_by, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {EXERCISE_SUGGESTION_COLUMNS}"
        ))
        .bind(draft.name)
        .bind(draft.main_category)
        .bind(draft.description)
        .bind(submitted_by)
        .bind(SuggestionStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_exercise_suggestion", e))?
        .try_into()
    }

    async fn list_exercise_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ExerciseSuggestion>, StoreError> {
        sqlx::query_as::<_, ExerciseSuggestionRow>(&format!(
            "SELECT {EXERCISE_SUGGESTION_COLUMNS} FROM exercise_suggestions \
             WHERE ($1::TEXT IS NULL OR status = $1) ORDER BY created_at, id"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_exercise_suggestions", e))?
        .into_iter()
        .map(ExerciseSuggestion::try_from)
        .collect()
    }

    #[instrument(skip(self))]
    async fn approve_exercise_suggestion(&self, id: i64, reviewer_id: i64) -> Result<Exercise, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let suggestion =
            review_exercise_suggestion(&mut tx, id, reviewer_id, ReviewDecision::Approve).await?;
        let exercise = insert_exercise(&mut tx, suggestion.promote(reviewer_id)).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(exercise)
    }

    #[instrument(skip(self))]
    async fn reject_exercise_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<ExerciseSuggestion, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let suggestion =
            review_exercise_suggestion(&mut tx, id, reviewer_id, ReviewDecision::Reject).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(suggestion)
    }

    #[instrument(skip(self, draft))]
    async fn create_article_suggestion(
        &self,
        draft: CreateArticle,
        submitted_by: i64,
    ) -> Result<ArticleSuggestion, StoreError> {
        sqlx::query_as::<_, ArticleSuggestionRow>(&format!(
            "INSERT INTO article_suggestions (title, content, submitted_by, status) \
             VALUES ($1, $2, $3, $4) RETURNING {ARTICLE_SUGGESTION_COLUMNS}"
        ))
        .bind(draft.title)
        .bind(draft.content)
        .bind(submitted_by)
        .bind(SuggestionStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_article_suggestion", e))?
        .try_into()
    }

    async fn list_article_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<ArticleSuggestion>, StoreError> {
        sqlx::query_as::<_, ArticleSuggestionRow>(&format!(
            "SELECT {ARTICLE_SUGGESTION_COLUMNS} FROM article_suggestions \
             WHERE ($1::TEXT IS NULL OR status = $1) ORDER BY created_at, id"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_article_suggestions", e))?
        .into_iter()
        .map(ArticleSuggestion::try_from)
        .collect()
    }

    #[instrument(skip(self))]
    async fn approve_article_suggestion(&self, id: i64, reviewer_id: i64) -> Result<Article, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let suggestion =
            review_article_suggestion(&mut tx, id, reviewer_id, ReviewDecision::Approve).await?;
        let article = insert_article(&mut tx, suggestion.promote(reviewer_id)).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(article)
    }

    #[instrument(skip(self))]
    async fn reject_article_suggestion(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<ArticleSuggestion, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let suggestion =
            review_article_suggestion(&mut tx, id, reviewer_id, ReviewDecision::Reject).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(suggestion)
    }
}
