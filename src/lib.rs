// Volley platform backend: authentication, club/coach management and the
// exercise/article suggestion workflow.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod store;

pub use errors::{ApiError, ErrorKind};
