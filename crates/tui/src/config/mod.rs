use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/koltseg.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "data/storage.json".to_string(),
            key: engine::DEFAULT_STORE_KEY.to_string(),
        }
    }
}

/// Only the store section of the shared config file matters here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
}

#[derive(Debug, Parser)]
#[command(name = "koltseg_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the file backing the entry store.
    #[arg(long)]
    store: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix("KOLTSEG")
            .prefix_separator("_")
            .separator("__"),
    );
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(store) = args.store {
        settings.store.path = store;
    }

    Ok(settings)
}
