use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::errors::{ApiError, ErrorKind};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Malformed token")]
    MalformedToken,
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("User not found")]
    UserNotFound,
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("Token encoding failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] crate::auth::password::PasswordError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AuthError::TokenExpired => ErrorKind::Expired,
            AuthError::InvalidSignature => ErrorKind::InvalidSignature,
            AuthError::MalformedToken => ErrorKind::Malformed,
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeaderFormat => ErrorKind::MissingToken,
            AuthError::UserNotFound => ErrorKind::UserNotFound,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Jwt(_) | AuthError::PasswordHashing(_) => ErrorKind::Internal,
            AuthError::Store(err) => err.kind(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::Auth(self).into_response()
    }
}
