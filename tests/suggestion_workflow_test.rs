mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::TestApp;
use volley_platform::auth::UserRole;
use volley_platform::models::{
    CreateArticle, ExerciseFilter, SubmitExerciseSuggestion, SuggestionStatus, User,
};
use volley_platform::services::SuggestionService;
use volley_platform::store::{ContentStore, InMemoryStore, StoreError, SuggestionStore};
use volley_platform::ErrorKind;

fn user(id: i64, role: UserRole) -> User {
    User {
        id,
        email: format!("user{id}@volley.test"),
        name: format!("User {id}"),
        password_hash: String::new(),
        role,
        club_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_reviewer_seven_promotes_coach_suggestion() {
    let store = Arc::new(InMemoryStore::new());
    let workflow = SuggestionService::new(store.clone());
    let coach = user(3, UserRole::Coach);
    let reviewer = user(7, UserRole::FederationAdmin);

    let submitted = workflow
        .submit_exercise(
            SubmitExerciseSuggestion {
                name: "Three-person pepper".to_string(),
                main_category: Some("passing".to_string()),
                description: Some("Pass, set, controlled attack in threes.".to_string()),
            },
            &coach,
        )
        .await
        .unwrap();

    let pending = workflow
        .list_exercise_suggestions(Some(SuggestionStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, submitted.id);

    let exercise = workflow.approve_exercise(submitted.id, &reviewer).await.unwrap();
    assert_eq!(exercise.name, "Three-person pepper");
    assert_eq!(exercise.main_category, "passing");
    assert_eq!(exercise.description.as_deref(), Some("Pass, set, controlled attack in threes."));
    assert_eq!(exercise.created_by, Some(3));
    assert_eq!(exercise.approved_by, Some(7));

    let approved = workflow
        .list_exercise_suggestions(Some(SuggestionStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].status.as_str(), "approved");
    assert_eq!(approved[0].reviewed_by, Some(7));
    assert!(approved[0].reviewed_at.is_some());
}

#[tokio::test]
async fn test_second_approval_fails_and_creates_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let workflow = SuggestionService::new(store.clone());
    let reviewer = user(7, UserRole::PlatformAdmin);

    let submitted = workflow
        .submit_exercise(
            SubmitExerciseSuggestion {
                name: "Float serve targets".to_string(),
                ..SubmitExerciseSuggestion::default()
            },
            &user(3, UserRole::Coach),
        )
        .await
        .unwrap();

    assert!(workflow.approve_exercise(submitted.id, &reviewer).await.is_ok());

    let err = workflow.approve_exercise(submitted.id, &reviewer).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyResolved);

    let err = workflow.reject_exercise(submitted.id, &reviewer).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyResolved);

    let exercises = store.list_exercises(&ExerciseFilter::default()).await.unwrap();
    assert_eq!(exercises.len(), 1);
}

#[tokio::test]
async fn test_concurrent_approvals_create_one_record() {
    let store = Arc::new(InMemoryStore::new());
    let suggestion = store
        .create_article_suggestion(
            CreateArticle {
                title: "Reading the hitter".to_string(),
                content: "Watch the approach angle.".to_string(),
            },
            3,
        )
        .await
        .unwrap();

    let suggestion_id = suggestion.id;
    let mut handles = Vec::new();
    for reviewer_id in 10..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.approve_article_suggestion(suggestion_id, reviewer_id).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_matches!(err, StoreError::AlreadyResolved { .. }),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.list_articles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejection_records_reviewer() {
    let store = Arc::new(InMemoryStore::new());
    let workflow = SuggestionService::new(store.clone());

    let submitted = workflow
        .submit_article(
            CreateArticle {
                title: "Libero rotations".to_string(),
                content: "Draft".to_string(),
            },
            &user(3, UserRole::Coach),
        )
        .await
        .unwrap();

    let rejected = workflow
        .reject_article(submitted.id, &user(8, UserRole::FederationAdmin))
        .await
        .unwrap();

    assert_eq!(rejected.status, SuggestionStatus::Rejected);
    assert_eq!(rejected.reviewed_by, Some(8));
    assert!(store.list_articles().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exercise_flow_over_http() {
    let app = TestApp::new();
    let coach = app.create_user(UserRole::Coach, None).await;
    let reviewer = app.create_user(UserRole::FederationAdmin, None).await;
    let coach_token = app.token_for(&coach);
    let reviewer_token = app.token_for(&reviewer);

    let (status, suggestion) = app
        .post(
            "/api/suggestions/exercises",
            Some(&coach_token),
            json!({ "name": "Wall setting", "main_category": "setting" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(suggestion["status"], "pending");
    assert_eq!(suggestion["submitted_by"], coach.id);
    let id = suggestion["id"].as_i64().unwrap();

    let (status, _) = app
        .get("/api/suggestions/exercises?status=pending", Some(&coach_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, listed) = app
        .get("/api/suggestions/exercises?status=pending", Some(&reviewer_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let approve_uri = format!("/api/suggestions/exercises/{id}/approve");

    let (status, _) = app.post(&approve_uri, Some(&coach_token), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, exercise) = app.post(&approve_uri, Some(&reviewer_token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exercise["name"], "Wall setting");
    assert_eq!(exercise["created_by"], coach.id);
    assert_eq!(exercise["approved_by"], reviewer.id);

    let (status, body) = app.post(&approve_uri, Some(&reviewer_token), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_resolved");

    let (_, exercises) = app.get("/api/exercises", None).await;
    assert_eq!(exercises.as_array().map(Vec::len), Some(1));

    let (status, body) = app
        .post("/api/suggestions/exercises/999/reject", Some(&reviewer_token), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_article_flow_over_http() {
    let app = TestApp::new();
    let coach = app.create_user(UserRole::Coach, None).await;
    let admin = app.create_user(UserRole::PlatformAdmin, None).await;

    let (status, _) = app
        .post(
            "/api/suggestions/articles",
            None,
            json!({ "title": "Anonymous", "content": "Nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, suggestion) = app
        .post(
            "/api/suggestions/articles",
            Some(&app.token_for(&coach)),
            json!({ "title": "Serve receive", "content": "Platform angle first." }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = suggestion["id"].as_i64().unwrap();

    let (status, rejected) = app
        .post(
            &format!("/api/suggestions/articles/{id}/reject"),
            Some(&app.token_for(&admin)),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
    assert_eq!(rejected["reviewed_by"], admin.id);

    let (_, articles) = app.get("/api/articles", None).await;
    assert_eq!(articles.as_array().map(Vec::len), Some(0));
}
