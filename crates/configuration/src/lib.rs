use crate::error::ConfigError;
use crate::settings::Settings;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use settings::ApiOverrides;
pub use settings::{ApiSettings, FALLBACK_API_BASE_URL, LoggingSettings};

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, an optional `config.toml` in
/// the working directory, then `TARIFFSHOCK__*` environment variables
/// (e.g. `TARIFFSHOCK__API__BASE_URL`).
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config.toml")
}

/// Same as [`load_config`] but reads the file layer from `path`.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("logging.level", "info")?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("TARIFFSHOCK")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // The base URL is not checked here: a command-line override may still replace it.
    // `ApiSettings::resolved_base_url` validates whatever value is finally used.
    Ok(builder.try_deserialize::<Settings>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_config_from("does-not-exist.toml").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn unusable_file_url_is_left_for_the_override() {
        let dir = std::env::temp_dir().join(format!("tariffshock-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"\"\n").unwrap();

        let mut settings = load_config_from(path.to_str().unwrap()).unwrap();
        assert!(settings.api.resolved_base_url().is_err());

        settings.api.base_url = Some("http://localhost:6000".to_string());
        assert_eq!(settings.api.resolved_base_url().unwrap(), "http://localhost:6000");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
