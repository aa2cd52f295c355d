// Domain records and request/response shapes

pub mod article;
pub mod club;
pub mod exercise;
pub mod suggestion;
pub mod user;

pub use article::*;
pub use club::*;
pub use exercise::*;
pub use suggestion::*;
pub use user::*;
