use serde::Deserialize;
use std::env;

// Top-level configuration container, one section per concern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub db_name: String,
}

// Admin bootstrap plus the static admin key the dashboard sends on login
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub admin_key: String,
    pub default_username: String,
    pub default_password: String,
    pub default_email: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cineticket=debug,tower_http=debug".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("MONGODB_URL")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                db_name: env::var("MONGODB_DB").unwrap_or_else(|_| "cineticket".to_string()),
            },
            admin: AdminConfig {
                admin_key: env::var("ADMIN_KEY").unwrap_or_else(|_| "Tyra2508".to_string()),
                default_username: env::var("DEFAULT_ADMIN_USERNAME")
                    .unwrap_or_else(|_| "admin".to_string()),
                default_password: env::var("DEFAULT_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "admin123".to_string()),
                default_email: env::var("DEFAULT_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@cineticket.local".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_uses_defaults() {
        let config = Config::from_env();
        assert_eq!(config.database.db_name, "cineticket");
        assert!(!config.admin.admin_key.is_empty());
        assert!(config.app.port > 0);
    }
}
