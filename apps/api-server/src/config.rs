//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_infra::DatabaseConfig;
use blog_shared::dto::BlogInfo;

/// Environments in which sample data is never seeded.
const NON_SEEDING_ENVIRONMENTS: &[&str] = &["test", "mock"];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Deployment environment name (`APP_ENV`).
    pub environment: String,
    pub seed_data: bool,
    pub database: Option<DatabaseConfig>,
    pub blog: BlogInfo,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let database = var("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            username: var("DATABASE_USERNAME"),
            password: var("DATABASE_PASSWORD"),
            max_connections: parsed(&var, "DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parsed(&var, "DB_MIN_CONNECTIONS").unwrap_or(1),
        });

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&var, "PORT").unwrap_or(8080),
            environment: var("APP_ENV").unwrap_or_else(|| "dev".to_string()),
            seed_data: var("SEED_DATA")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            database,
            blog: BlogInfo {
                title: var("BLOG_TITLE").unwrap_or_else(|| "Posts".to_string()),
                description: non_empty(&var, "BLOG_DESCRIPTION"),
                author: non_empty(&var, "BLOG_AUTHOR"),
            },
        }
    }

    /// Whether the startup seed step should run.
    pub fn seeding_enabled(&self) -> bool {
        self.seed_data && !NON_SEEDING_ENVIRONMENTS.contains(&self.environment.as_str())
    }
}

/// Look up `key` and parse it, treating unparsable values as absent.
fn parsed<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    var(key).and_then(|s| s.parse().ok())
}

/// Look up `key`, treating an empty value as absent.
fn non_empty(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    var(key).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.database.is_none());
        assert!(cfg.seeding_enabled());
        assert_eq!(cfg.blog.title, "Posts");
    }

    #[test]
    fn test_database_settings() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/blogdb"),
            ("DATABASE_USERNAME", "user"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("PORT", "not-a-port"),
        ]);
        let db = cfg.database.unwrap();
        assert_eq!(db.username.as_deref(), Some("user"));
        assert_eq!(db.max_connections, 25);
        assert_eq!(db.min_connections, 1);
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn test_seeding_disabled_in_test_environments() {
        assert!(!config(&[("APP_ENV", "test")]).seeding_enabled());
        assert!(!config(&[("APP_ENV", "mock")]).seeding_enabled());
        assert!(!config(&[("SEED_DATA", "false")]).seeding_enabled());
        assert!(config(&[("APP_ENV", "prod")]).seeding_enabled());
    }

    #[test]
    fn test_empty_blog_properties_are_absent() {
        let cfg = config(&[("BLOG_AUTHOR", ""), ("BLOG_DESCRIPTION", "About posts")]);
        assert!(cfg.blog.author.is_none());
        assert_eq!(cfg.blog.description.as_deref(), Some("About posts"));
    }
}
