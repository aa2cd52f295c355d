use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::{AuthError, Claims, IssuedToken};

/// Time source used for token issuance and expiry checks.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// JWT token service for creating and validating tokens.
///
/// Tokens are HS256-signed and stateless: there is no revocation list, so a
/// token stops being accepted only when it expires or the secret changes.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("access_token_expires_in", &self.access_token_expires_in)
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given secret
    pub fn new(secret: &str, access_token_expires_in: Duration) -> Self {
        Self::with_clock(secret, access_token_expires_in, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, access_token_expires_in: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in,
            clock,
        }
    }

    /// Sign a token for `subject` that expires `ttl` from now
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Create an access token for a user id
    pub fn create_access_token(&self, user_id: i64) -> Result<IssuedToken, AuthError> {
        let token = self.issue(&user_id.to_string(), self.access_token_expires_in)?;
        Ok(IssuedToken {
            token,
            expires_in: self.access_token_expires_in_seconds(),
        })
    }

    /// Validate a token and return its claims.
    ///
    /// The signature is checked before anything else, so a tampered token is
    /// reported as `InvalidSignature` even if it has also expired.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is compared against our own clock below
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|err| match err.kind() {
                JwtErrorKind::InvalidSignature => AuthError::InvalidSignature,
                JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::MalformedToken,
            })?;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Validate a token and return its subject
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.validate_token(token).map(|claims| claims.sub)
    }

    /// Get access token expiration time in seconds
    pub fn access_token_expires_in_seconds(&self) -> i64 {
        self.access_token_expires_in.num_seconds()
    }
}

/// Extract bearer token from authorization header
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthHeaderFormat)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidAuthHeaderFormat);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeaderFormat);
    }

    Ok(token)
}
