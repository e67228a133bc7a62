//! Handles settings for the application. Configuration is read from an
//! optional TOML file (`config/koltseg.toml` unless `--config` says
//! otherwise), then from `KOLTSEG_*` environment variables with `__` between
//! nested keys, e.g. `KOLTSEG_STORE__PATH`.
//!
//! See `config/koltseg.example.toml` for the available keys.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/koltseg.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Store {
    pub path: String,
    pub key: String,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            path: "data/storage.json".to_string(),
            key: engine::DEFAULT_STORE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Chart {
    pub width: f64,
    pub height: f64,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub store: Store,
    pub chart: Chart,
}

impl Settings {
    pub fn new(path: Option<&str>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(false))
            .add_source(
                Environment::with_prefix("KOLTSEG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::new(Some("config/does-not-exist")).unwrap();
        assert_eq!(settings.store.key, engine::DEFAULT_STORE_KEY);
        assert_eq!(settings.chart.width, 600.0);
    }
}
