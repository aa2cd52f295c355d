pub mod app;
pub mod database;
pub mod seeding;

pub use app::{AdminAccount, AppConfig, StorageBackend};
pub use database::DatabaseConfig;
pub use seeding::DatabaseSeeder;
