//! Engine configuration.
//!
//! Resolved from environment variables (after `.env` loading in the binary)
//! with the data directory's `settings.yaml` supplying the default language.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::infrastructure::ports::DocumentStore;

/// Language used when neither the environment nor the settings file names one.
pub const DEFAULT_LANGUAGE: &str = "ru";
/// Data root used when `TALEFORGE_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "data";
/// File name of a localization document inside a mod or adventure directory.
pub const LOCALIZATION_FILE: &str = "localization.yaml";

pub const DATA_DIR_ENV: &str = "TALEFORGE_DATA_DIR";
pub const LANGUAGE_ENV: &str = "TALEFORGE_LANGUAGE";

/// Paths and defaults for the content engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    data_dir: PathBuf,
    language: String,
}

impl EngineConfig {
    pub fn new(data_dir: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            language: language.into(),
        }
    }

    /// Build from `TALEFORGE_DATA_DIR` / `TALEFORGE_LANGUAGE`.
    pub fn from_env(store: &dyn DocumentStore) -> Self {
        Self::resolve(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(LANGUAGE_ENV).ok(),
            store,
        )
    }

    /// Resolve explicit overrides, falling back to the settings file and then
    /// the built-in defaults. Blank values count as unset.
    pub fn resolve(
        data_dir: Option<String>,
        language: Option<String>,
        store: &dyn DocumentStore,
    ) -> Self {
        let data_dir = PathBuf::from(
            data_dir
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_DIR.into()),
        );
        let mut config = Self::new(data_dir, DEFAULT_LANGUAGE);
        let language = language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .or_else(|| settings_language(store, &config.settings_path()));
        if let Some(language) = language {
            config.language = language;
        }
        config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Language the overlay starts in.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn base_localization_path(&self) -> PathBuf {
        self.data_dir.join("yaml").join(LOCALIZATION_FILE)
    }

    pub fn race_catalog_path(&self) -> PathBuf {
        self.data_dir.join("yaml").join("races").join("races.yaml")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("yaml").join("settings.yaml")
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.data_dir.join("mods")
    }

    pub fn adventures_dir(&self) -> PathBuf {
        self.data_dir.join("adventures")
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, DEFAULT_LANGUAGE)
    }
}

/// `ui.language` from the settings document, if present and readable.
fn settings_language(store: &dyn DocumentStore, path: &Path) -> Option<String> {
    let document = match store.read_document(path) {
        Ok(document) => document?,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read settings file");
            return None;
        }
    };
    document
        .get("ui")
        .and_then(|ui| ui.get("language"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}
