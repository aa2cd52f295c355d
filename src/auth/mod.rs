// Credentials, tokens, identity resolution and role checks

pub mod errors;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use errors::AuthError;
pub use guard::AccessGuard;
pub use jwt::{extract_bearer_token, Clock, JwtService, SystemClock};
pub use middleware::CurrentUser;
pub use models::{Claims, IssuedToken, LoginRequest, TokenResponse, UnknownRole, UserRole};
pub use password::{PasswordError, PasswordHasher, PasswordPolicy};
pub use service::AuthService;
