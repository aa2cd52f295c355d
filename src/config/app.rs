use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::Duration;
use tracing::warn;

const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => bail!("unknown STORAGE_BACKEND '{other}' (expected postgres or memory)"),
        }
    }
}

/// Platform admin created at startup when credentials are configured.
#[derive(Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub seed_demo_data: bool,
    pub admin: Option<AdminAccount>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cors_origins", &self.cors_origins)
            .field("storage_backend", &self.storage_backend)
            .field("seed_demo_data", &self.seed_demo_data)
            .field("admin", &self.admin)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let host = get("HOST", "0.0.0.0");
        let port = get("PORT", "3000").parse().context("PORT must be a port number")?;
        let environment = get("ENVIRONMENT", "development");

        let jwt_secret = match var("JWT_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None if environment == "production" => {
                bail!("JWT_SECRET must be set when ENVIRONMENT=production")
            }
            None => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let access_token_expire_minutes: i64 = get("ACCESS_TOKEN_EXPIRE_MINUTES", "60")
            .parse()
            .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?;
        if access_token_expire_minutes <= 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive");
        }

        let bcrypt_cost: u32 = get("BCRYPT_COST", "12")
            .parse()
            .context("BCRYPT_COST must be an integer")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let storage_backend = get("STORAGE_BACKEND", "postgres").parse()?;
        let seed_demo_data = matches!(
            get("SEED_DEMO_DATA", "false").to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        );

        let admin = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminAccount {
                email,
                password,
                name: get("ADMIN_NAME", "Platform Admin"),
            }),
            _ => None,
        };

        Ok(AppConfig {
            host,
            port,
            environment,
            jwt_secret,
            access_token_expire_minutes,
            bcrypt_cost,
            cors_origins,
            storage_backend,
            seed_demo_data,
            admin,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expire_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert!(config.is_development());
        assert_eq!(config.access_token_ttl(), Duration::minutes(60));
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert!(config.cors_origins.is_empty());
        assert!(!config.seed_demo_data);
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_production_requires_secret() {
        assert!(config(&[("ENVIRONMENT", "production")]).is_err());

        let config = config(&[("ENVIRONMENT", "production"), ("JWT_SECRET", "s3cr3t")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.jwt_secret, "s3cr3t");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "15"),
            ("CORS_ORIGINS", "https://a.bg, https://b.bg,"),
            ("STORAGE_BACKEND", "memory"),
            ("SEED_DEMO_DATA", "true"),
            ("ADMIN_EMAIL", "root@volley.bg"),
            ("ADMIN_PASSWORD", "Admin#2024"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.access_token_ttl(), Duration::minutes(15));
        assert_eq!(config.cors_origins, vec!["https://a.bg", "https://b.bg"]);
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(config.seed_demo_data);
        assert_eq!(config.admin.map(|a| a.name), Some("Platform Admin".to_string()));
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("BCRYPT_COST", "2")]).is_err());
        assert!(config(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "0")]).is_err());
        assert!(config(&[("STORAGE_BACKEND", "sqlite")]).is_err());
    }
}
