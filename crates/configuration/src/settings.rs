use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// Used when neither the configuration nor the build environment names a service.
pub const FALLBACK_API_BASE_URL: &str = "http://localhost:5001";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the risk service lives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the risk service, without a trailing slash.
    /// When absent, [`ApiSettings::resolved_base_url`] falls back to the build-time value.
    pub base_url: Option<String>,
}

impl ApiSettings {
    /// Resolves the base URL: configured value, else the `TARIFFSHOCK_API_BASE_URL`
    /// captured at build time, else [`FALLBACK_API_BASE_URL`].
    pub fn resolved_base_url(&self) -> Result<String, ConfigError> {
        let raw = match self.base_url.as_deref() {
            Some(url) => url,
            None => option_env!("TARIFFSHOCK_API_BASE_URL").unwrap_or(FALLBACK_API_BASE_URL),
        };

        let url = raw.strip_suffix('/').unwrap_or(raw);
        if url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".to_string(),
            ));
        }
        Ok(url.to_string())
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

/// Command-line overrides for [`ApiSettings`].
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ApiOverrides {
    /// Base URL of the risk service (e.g. "http://localhost:5001").
    #[arg(long = "api-url", global = true)]
    pub base_url: Option<String>,
}

#[cfg(feature = "clap")]
impl ApiOverrides {
    /// Applies the overrides on top of the loaded settings.
    pub fn apply(&self, settings: &mut ApiSettings) {
        if let Some(url) = &self.base_url {
            settings.base_url = Some(url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let api = ApiSettings {
            base_url: Some("https://risk.example.org/".to_string()),
        };
        assert_eq!(api.resolved_base_url().unwrap(), "https://risk.example.org");
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        let api = ApiSettings {
            base_url: Some("https://risk.example.org/v1//".to_string()),
        };
        assert_eq!(api.resolved_base_url().unwrap(), "https://risk.example.org/v1/");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        for raw in ["", "/"] {
            let api = ApiSettings {
                base_url: Some(raw.to_string()),
            };
            assert!(matches!(
                api.resolved_base_url(),
                Err(ConfigError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn missing_base_url_falls_back() {
        let url = ApiSettings::default().resolved_base_url().unwrap();
        let raw = option_env!("TARIFFSHOCK_API_BASE_URL").unwrap_or(FALLBACK_API_BASE_URL);
        let expected = raw.strip_suffix('/').unwrap_or(raw);
        assert_eq!(url, expected);
    }
}
