use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub sqlite_path: String,
    pub jwt_secret: String,
    pub jwt_expiration_ms: u64,
    pub cors_origin: String,
    pub admin_email: String,
    pub admin_password: Option<String>,
    pub rate_limit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            sqlite_path: "./data/yoga.db".to_string(),
            jwt_secret: "change-me-to-a-random-64-char-string".to_string(),
            jwt_expiration_ms: 86_400_000,
            cors_origin: "http://localhost:4200".to_string(),
            admin_email: "yoga@studio.com".to_string(),
            admin_password: None,
            rate_limit: true,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            server_port: match env::var("SERVER_PORT") {
                Ok(v) => v.parse().context("SERVER_PORT must be a valid port number")?,
                Err(_) => defaults.server_port,
            },
            sqlite_path: env::var("SQLITE_PATH").unwrap_or(defaults.sqlite_path),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration_ms: match env::var("JWT_EXPIRATION_MS") {
                Ok(v) => v
                    .parse()
                    .context("JWT_EXPIRATION_MS must be a number of milliseconds")?,
                Err(_) => defaults.jwt_expiration_ms,
            },
            cors_origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            rate_limit: env::var("RATE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit),
        })
    }
}
