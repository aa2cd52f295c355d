// Business logic services

pub mod club_service;
pub mod content_service;
pub mod suggestion_service;
pub mod user_service;

pub use club_service::ClubService;
pub use content_service::ContentService;
pub use suggestion_service::SuggestionService;
pub use user_service::UserService;
