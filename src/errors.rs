use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Error taxonomy shared by every layer.
///
/// Each concrete error type exposes `kind()` so tests and the HTTP boundary
/// can reason about failures without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCredentials,
    Expired,
    InvalidSignature,
    Malformed,
    MissingToken,
    UserNotFound,
    Forbidden,
    NotFound,
    AlreadyResolved,
    Conflict,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidCredentials
            | ErrorKind::Expired
            | ErrorKind::InvalidSignature
            | ErrorKind::Malformed
            | ErrorKind::MissingToken
            | ErrorKind::UserNotFound => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyResolved | ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::Expired => "expired",
            ErrorKind::InvalidSignature => "invalid_signature",
            ErrorKind::Malformed => "malformed",
            ErrorKind::MissingToken => "missing_token",
            ErrorKind::UserNotFound => "user_not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyResolved => "already_resolved",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Validation => "validation",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Auth(err) => err.kind(),
            ApiError::Store(err) => err.kind(),
            ApiError::Validation(_) => ErrorKind::Validation,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let message = if kind == ErrorKind::Internal {
            tracing::error!(error = %self, "internal error while handling request");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": kind.as_str(),
            "message": message,
        }));

        (kind.status_code(), body).into_response()
    }
}
