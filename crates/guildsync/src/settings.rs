//! Application settings.

use directories::ProjectDirs;
use guildsync_client::{GuildSyncClient, RateLimitConfig, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT};
use guildsync_core::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable overriding `website.url`
pub const ENV_URL: &str = "GUILDSYNC_URL";

/// Environment variable overriding `website.token`
pub const ENV_TOKEN: &str = "GUILDSYNC_TOKEN";

/// Top-level settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Backend location and credentials.
    #[serde(default)]
    pub website: WebsiteConfig,

    /// HTTP behaviour.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Backend location and credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct WebsiteConfig {
    /// Base URL, e.g. `https://example.org`.
    #[serde(default)]
    pub url: String,

    /// API token sent as `Authorization: Token <token>`.
    #[serde(default)]
    pub token: String,
}

impl std::fmt::Debug for WebsiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsiteConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// HTTP behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on pages followed by one listing.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Optional client-side request rate.
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_pages: default_max_pages(),
            requests_per_second: None,
        }
    }
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "guildsync", "guildsync")
            .ok_or_else(|| SyncError::Config("could not determine config directory".into()))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load settings from `path`, or the default location when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error. Environment overrides are applied and the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                return Err(SyncError::Config(format!(
                    "config file {} does not exist",
                    p.display()
                )));
            }
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| SyncError::Config(format!("failed to read {}: {e}", path.display())))?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from TOML text without validating them.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SyncError::Config(e.to_string()))
    }

    /// Apply `GUILDSYNC_URL` / `GUILDSYNC_TOKEN` style overrides.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.is_empty()) {
            self.website.url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.website.token = token;
        }
    }

    /// Check that the settings can produce a working client.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.website.url)
            .map_err(|e| SyncError::Config(format!("website.url {:?}: {e}", self.website.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SyncError::Config(format!(
                "website.url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.website.token.trim().is_empty() {
            return Err(SyncError::Config(format!(
                "website.token is empty (set it in the config file or {ENV_TOKEN})"
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(SyncError::Config("http.timeout_secs must be at least 1".into()));
        }
        if self.http.max_pages == 0 {
            return Err(SyncError::Config("http.max_pages must be at least 1".into()));
        }
        if self.http.requests_per_second == Some(0) {
            return Err(SyncError::Config(
                "http.requests_per_second must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build a backend client from these settings.
    pub fn client(&self) -> Result<GuildSyncClient> {
        let mut builder = GuildSyncClient::builder(&self.website.url, self.website.token.clone())
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_pages(self.http.max_pages);

        if let Some(rate) = self.http.requests_per_second.and_then(NonZeroU32::new) {
            builder = builder.rate_limit(RateLimitConfig::new().per_second(rate).burst(rate));
        }

        builder.build()
    }
}

// Default value functions for serde.
const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

const fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [website]
        url = "https://example.org"
        token = "from-file"

        [http]
        timeout_secs = 5
        requests_per_second = 20
    "#;

    #[test]
    fn test_parse_with_defaults() {
        let settings = Settings::from_toml(SAMPLE).unwrap();
        assert_eq!(settings.website.url, "https://example.org");
        assert_eq!(settings.http.timeout_secs, 5);
        assert_eq!(settings.http.max_pages, 1000);
        assert_eq!(settings.http.requests_per_second, Some(20));
        settings.validate().unwrap();
    }

    #[test]
    fn test_env_overrides_file() {
        let mut settings = Settings::from_toml(SAMPLE).unwrap();
        let env: HashMap<&str, &str> = [(ENV_TOKEN, "from-env"), (ENV_URL, "")].into();

        settings.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(settings.website.token, "from-env");
        assert_eq!(settings.website.url, "https://example.org");
    }

    #[test]
    fn test_validation_rejects_missing_token() {
        let settings = Settings::from_toml("[website]\nurl = \"https://example.org\"").unwrap();
        assert!(matches!(settings.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let settings =
            Settings::from_toml("[website]\nurl = \"ftp://example.org\"\ntoken = \"t\"").unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::from_toml("[website]\nurl = \"example\"\ntoken = \"t\"").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut settings = Settings::from_toml(SAMPLE).unwrap();
        settings.http.timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        let client = settings.client().unwrap();

        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert_eq!(client.base_url().as_str(), "https://example.org/");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        let err = Settings::load(Some(&missing)).unwrap_err();

        assert!(matches!(err, SyncError::Config(ref msg) if msg.contains("does not exist")));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Settings::from_toml("[website\nurl=").unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let settings = Settings::from_toml(SAMPLE).unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("from-file"));
    }
}
