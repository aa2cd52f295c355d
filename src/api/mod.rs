// API routes and handlers

pub mod articles;
pub mod auth;
pub mod clubs;
pub mod exercises;
pub mod extract;
pub mod health;
pub mod routes;
pub mod suggestions;
pub mod users;

pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use routes::{create_routes, AppState};
