use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CONTENT_DIR: &str = "content";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process-level settings taken from the environment.
///
/// Site copy (names, hero text, form labels...) is not here; it lives in
/// `site.toml` under the content directory.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub is_development: bool,
    pub content_dir: PathBuf,
    /// Base URL of the contact backend, without trailing slash.
    pub backend_url: Option<String>,
    pub analytics: AnalyticsSettings,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsSettings {
    pub measurement_id: Option<String>,
    pub api_secret: Option<String>,
}

impl AnalyticsSettings {
    pub fn is_enabled(&self) -> bool {
        self.measurement_id.is_some()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, the way a blank line in an .env file would.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            is_development: get("RUST_ENV").is_some_and(|v| v == "development"),
            content_dir: get("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
            backend_url: get("BACKEND_URL").map(|url| url.trim_end_matches('/').to_string()),
            analytics: AnalyticsSettings {
                measurement_id: get("GA_MEASUREMENT_ID"),
                api_secret: get("GA_API_SECRET"),
            },
        })
    }
}
