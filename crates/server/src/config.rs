use std::{collections::HashMap, path::PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub images_dir: PathBuf,
    /// Catalog file replacing the bundled Paris/Bangkok data.
    pub catalog_path: Option<PathBuf>,
    pub session_idle_minutes: u64,
    pub eviction_interval_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            images_dir: "images".into(),
            catalog_path: None,
            session_idle_minutes: 120,
            eviction_interval_secs: 60,
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    build_settings(SETTINGS_FILE, std::env::vars().collect())
}

/// Defaults, then the optional settings file, then `APP__*` variables.
/// A bare `SERVER_BIND` is still honoured unless `APP__BIND_ADDR` is set.
pub(crate) fn build_settings(
    file: &str,
    env: HashMap<String, String>,
) -> anyhow::Result<Settings> {
    let legacy_bind = env
        .get("SERVER_BIND")
        .filter(|_| !env.contains_key("APP__BIND_ADDR"))
        .cloned();

    let settings: Settings = Config::builder()
        .add_source(Config::try_from(&Settings::default())?)
        .add_source(File::new(file, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true)
                .source(Some(env)),
        )
        .build()
        .with_context(|| format!("failed to read settings from '{file}' and environment"))?
        .try_deserialize()
        .context("invalid server settings")?;

    Ok(match legacy_bind {
        Some(bind_addr) => Settings {
            bind_addr,
            ..settings
        },
        None => settings,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
