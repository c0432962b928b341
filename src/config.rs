//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `JWT_SECRET` (required): HMAC secret used to sign session tokens
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `JWT_EXPIRATION_MINUTES` (optional): token lifetime, defaults to 60
/// - `BCRYPT_COST` (optional): password hashing cost, defaults to 12
/// - `APP_ENV` (optional): `development` or `production`, defaults to production
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_jwt_expiration_minutes")]
    pub jwt_expiration_minutes: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default)]
    pub app_env: AppEnv,
}

/// Deployment environment. Controls whether internal error details reach clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    #[default]
    Production,
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_jwt_expiration_minutes() -> i64 {
    60
}

fn default_bcrypt_cost() -> u32 {
    12
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (`DATABASE_URL`, `JWT_SECRET`)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    pub fn is_development(&self) -> bool {
        self.app_env == AppEnv::Development
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/wallet"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.jwt_expiration_minutes, 60);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.app_env, AppEnv::Production);
        assert!(!config.is_development());
    }

    #[test]
    fn app_env_parses_lowercase() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/wallet"),
            ("JWT_SECRET", "secret"),
            ("APP_ENV", "development"),
            ("SERVER_PORT", "8080"),
        ]))
        .unwrap();

        assert!(config.is_development());
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn missing_jwt_secret_is_an_error() {
        let result = envy::from_iter::<_, Config>(vars(&[(
            "DATABASE_URL",
            "postgres://localhost/wallet",
        )]));
        assert!(result.is_err());
    }
}
