use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub omdb: OmdbConfig,

    pub cache: CacheConfig,

    pub favorites: FavoritesConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/screen-search.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub bind_address: String,

    pub port: u16,

    /// Use `"*"` to allow any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    pub api_url: String,

    /// Never serialized back to disk by `save`.
    #[serde(skip_serializing)]
    pub api_key: String,

    pub request_timeout_seconds: u64,

    pub max_redirects: usize,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_url: "http://www.omdbapi.com/".to_string(),
            api_key: String::new(),
            request_timeout_seconds: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub namespace: String,

    /// Lifetime of a non-empty search result.
    pub found_ttl_seconds: i64,

    /// Lifetime of an empty ("not found") search result.
    pub not_found_ttl_seconds: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: crate::constants::cache::SEARCH_NAMESPACE.to_string(),
            found_ttl_seconds: crate::constants::cache::FOUND_TTL_SECONDS,
            not_found_ttl_seconds: crate::constants::cache::NOT_FOUND_TTL_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Identity used for every favorites request until real authentication exists.
    pub default_user_id: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            default_user_id: crate::constants::favorites::DEFAULT_USER_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "screen-search".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            omdb: OmdbConfig::default(),
            cache: CacheConfig::default(),
            favorites: FavoritesConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        // A missing .env is the normal production case.
        let _ = dotenvy::dotenv();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(&path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Environment variables win over the config file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OMDB_API_KEY") {
            self.omdb.api_key = key;
        }
        if let Some(url) = lookup("OMDB_API_URL").filter(|u| !u.is_empty()) {
            self.omdb.api_url = url;
        }
        if let Some(db) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.general.database_path = db;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("screen-search").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".screen-search").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.omdb.api_url.trim().is_empty() {
            anyhow::bail!("OMDb API URL cannot be empty");
        }

        if self.cache.found_ttl_seconds <= 0 || self.cache.not_found_ttl_seconds <= 0 {
            anyhow::bail!("Cache TTLs must be positive");
        }

        if self.favorites.default_user_id.trim().is_empty() {
            anyhow::bail!("Default favorites user cannot be empty");
        }

        if self.omdb.api_key.is_empty() {
            tracing::warn!("OMDB_API_KEY is not set; movie searches will be rejected upstream");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.omdb.api_url, "http://www.omdbapi.com/");
        assert_eq!(config.omdb.request_timeout_seconds, 10);
        assert_eq!(config.omdb.max_redirects, 5);
        assert_eq!(config.cache.found_ttl_seconds, 24 * 60 * 60);
        assert_eq!(config.cache.not_found_ttl_seconds, 30 * 60);
        assert_eq!(config.favorites.default_user_id, "user-123");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_omits_api_key() {
        let mut config = Config::default();
        config.omdb.api_key = "secret".to_string();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[omdb]"));
        assert!(toml_str.contains("[cache]"));
        assert!(!toml_str.contains("secret"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [cache]
            not_found_ttl_seconds = 60
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.cache.not_found_ttl_seconds, 60);

        assert_eq!(config.cache.found_ttl_seconds, 86_400);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OMDB_API_KEY", "abc123"),
            ("OMDB_API_URL", "http://localhost:9999/"),
            ("PORT", "8081"),
            ("DATABASE_URL", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.omdb.api_key, "abc123");
        assert_eq!(config.omdb.api_url, "http://localhost:9999/");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.general.database_path, "sqlite:data/screen-search.db");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.cache.not_found_ttl_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.favorites.default_user_id = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
