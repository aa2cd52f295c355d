// Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use volley_platform::api::{create_routes, AppState};
use volley_platform::auth::{JwtService, PasswordHasher, UserRole};
use volley_platform::models::{NewUser, User};
use volley_platform::store::{InMemoryStore, UserStore};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_only";
pub const TEST_PASSWORD: &str = "Volley#2024";

/// Application wired to an in-memory store with a cheap bcrypt cost.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub state: AppState,
    pub jwt: JwtService,
    hasher: PasswordHasher,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let jwt = JwtService::new(TEST_SECRET, Duration::minutes(60));
        let hasher = PasswordHasher::new(4);
        let state = AppState::new(store.clone(), jwt.clone(), hasher).unwrap();

        Self {
            store,
            state,
            jwt,
            hasher,
        }
    }

    pub fn router(&self) -> Router {
        create_routes(self.state.clone(), &[])
    }

    /// Insert a user straight into the store with `TEST_PASSWORD`.
    pub async fn create_user(&self, role: UserRole, club_id: Option<i64>) -> User {
        let email = format!("{}@volley.test", Uuid::new_v4().simple());
        self.store
            .create_user(NewUser {
                email,
                name: Name().fake(),
                password_hash: self.hasher.hash(TEST_PASSWORD).unwrap(),
                role,
                club_id,
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, user: &User) -> String {
        self.jwt.create_access_token(user.id).unwrap().token
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}
