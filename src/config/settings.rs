//! Application settings loaded from environment variables.

use std::env;

use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Hash passwords before storing them (Argon2)
    pub password_hashing: bool,
    /// Insert a review and its photos in one transaction
    pub atomic_review_photos: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("password_hashing", &self.password_hashing)
            .field("atomic_review_photos", &self.atomic_review_photos)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            password_hashing: true,
            atomic_review_photos: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// development defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        if env::var("PASSWORD_HASHING").is_ok_and(|v| !parse_flag(&v, true)) {
            tracing::warn!("PASSWORD_HASHING disabled, passwords will be stored as submitted");
        }

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            password_hashing: env::var("PASSWORD_HASHING")
                .map(|v| parse_flag(&v, defaults.password_hashing))
                .unwrap_or(defaults.password_hashing),
            atomic_review_photos: env::var("REVIEW_PHOTOS_ATOMIC")
                .map(|v| parse_flag(&v, defaults.atomic_review_photos))
                .unwrap_or(defaults.atomic_review_photos),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Interpret a boolean environment flag, keeping `default` for unknown values.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
