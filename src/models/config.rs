//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Monitoring behavior settings
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Press-release source to poll
    #[serde(default)]
    pub source: SourceConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.monitor.ticker.trim().is_empty() {
            return Err(AppError::validation("monitor.ticker is empty"));
        }
        if self.monitor.release_count == 0 {
            return Err(AppError::validation("monitor.release_count must be > 0"));
        }
        if self.monitor.refresh_secs == 0 {
            return Err(AppError::validation("monitor.refresh_secs must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        match &self.source {
            SourceConfig::Feed { url } => {
                if url.trim().is_empty() {
                    return Err(AppError::validation("source.url is empty"));
                }
            }
            SourceConfig::Scrape {
                url,
                headline_class,
            } => {
                if url.trim().is_empty() {
                    return Err(AppError::validation("source.url is empty"));
                }
                if headline_class.trim().is_empty() {
                    return Err(AppError::validation("source.headline_class is empty"));
                }
                if headline_class.contains(char::is_whitespace) {
                    return Err(AppError::validation(
                        "source.headline_class must be a single CSS class",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            http: HttpConfig::default(),
            source: SourceConfig::default(),
        }
    }
}

/// Monitoring behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Ticker symbol of the monitored company
    #[serde(default = "defaults::ticker")]
    pub ticker: String,

    /// How many releases to retrieve per fetch
    #[serde(default = "defaults::release_count")]
    pub release_count: usize,

    /// Seconds a fetched result stays fresh before the next network hit
    #[serde(default = "defaults::refresh_secs")]
    pub refresh_secs: u64,

    /// Path of the last-seen record file
    #[serde(default = "defaults::storage_file")]
    pub storage_file: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            ticker: defaults::ticker(),
            release_count: defaults::release_count(),
            refresh_secs: defaults::refresh_secs(),
            storage_file: defaults::storage_file(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Press-release source selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Syndication feed endpoint
    Feed {
        /// Feed URL
        url: String,
    },

    /// HTML listing page scraped with a class-based selector
    Scrape {
        /// Listing page URL
        url: String,

        /// CSS class marking each headline block
        headline_class: String,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Feed {
            url: defaults::feed_url(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Monitor defaults
    pub fn ticker() -> String {
        "BE".into()
    }
    pub fn release_count() -> usize {
        3
    }
    pub fn refresh_secs() -> u64 {
        1200
    }
    pub fn storage_file() -> PathBuf {
        PathBuf::from("last_press_release.json")
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; presswatch/1.0)".into()
    }
    pub fn timeout() -> u64 {
        10
    }

    // Source defaults
    pub fn feed_url() -> String {
        "https://investor.bloomenergy.com/rss".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_release_count() {
        let mut config = Config::default();
        config.monitor.release_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_multi_class_selector() {
        let mut config = Config::default();
        config.source = SourceConfig::Scrape {
            url: "https://example.com/news".to_string(),
            headline_class: "press release".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_scrape_source_from_toml() {
        let toml = r#"
            [monitor]
            ticker = "BE"
            release_count = 10

            [source]
            mode = "scrape"
            url = "https://investor.bloomenergy.com/news"
            headline_class = "press-release-item"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.monitor.release_count, 10);
        assert!(matches!(config.source, SourceConfig::Scrape { .. }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_rejects_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(Config::load(tmp.path().join("absent.toml")).is_err());
    }

    #[test]
    fn load_rejects_malformed_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        std::fs::write(&path, "[monitor\nticker = ").unwrap();

        assert!(Config::load(&path).is_err());
        // The lenient loader substitutes defaults instead
        assert!(Config::load_or_default(&path).validate().is_ok());
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.monitor.release_count, 3);
        assert_eq!(config.monitor.refresh_secs, 1200);
        assert_eq!(config.http.timeout_secs, 10);
        assert!(matches!(config.source, SourceConfig::Feed { .. }));
    }
}
