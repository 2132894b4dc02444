use serde::{Deserialize, Serialize};

use crate::shared::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub remote: RemoteConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Run a queue flush as part of application start.
    pub flush_on_start: bool,
    /// Cached session lifetime in hours.
    pub session_ttl_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/destajos.db?mode=rwc".to_string(),
                max_connections: 5,
            },
            remote: RemoteConfig {
                base_url: "http://localhost:8080".to_string(),
                timeout_secs: 30,
            },
            sync: SyncConfig {
                flush_on_start: true,
                session_ttl_hours: 24,
            },
        }
    }
}

impl AppConfig {
    /// Default configuration with `DESTAJOS_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DESTAJOS_DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(base) = std::env::var("DESTAJOS_REMOTE_URL") {
            config.remote.base_url = base;
        }
        if let Ok(timeout) = std::env::var("DESTAJOS_REMOTE_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                config.remote.timeout_secs = timeout;
            }
        }
        if let Ok(flag) = std::env::var("DESTAJOS_FLUSH_ON_START") {
            config.sync.flush_on_start = flag != "0" && !flag.eq_ignore_ascii_case("false");
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(AppError::Configuration("database url is empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::Configuration(
                "database max_connections must be at least 1".into(),
            ));
        }
        if !self.remote.base_url.starts_with("http://") && !self.remote.base_url.starts_with("https://")
        {
            return Err(AppError::Configuration(format!(
                "remote base_url must be http(s): {}",
                self.remote.base_url
            )));
        }
        if self.remote.timeout_secs == 0 {
            return Err(AppError::Configuration("remote timeout must be positive".into()));
        }
        if self.sync.session_ttl_hours <= 0 {
            return Err(AppError::Configuration("session ttl must be positive".into()));
        }
        Ok(())
    }
}
