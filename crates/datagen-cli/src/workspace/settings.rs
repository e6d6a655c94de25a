use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use datagen_generate::{ClassYearRule, GenerateOptions, SiblingBackfill};

use super::atomic::write_bytes_atomic;
use super::WorkspaceResult;

/// Contents of `datagen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub max_records: u32,
    pub sibling_backfill: SiblingBackfill,
    pub class_year: ClassYearRule,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let options = GenerateOptions::default();
        Self {
            seed: options.seed,
            max_records: options.max_records,
            sibling_backfill: options.sibling_backfill,
            class_year: options.class_year,
        }
    }
}

impl GenerationSettings {
    pub fn to_options(&self) -> GenerateOptions {
        GenerateOptions {
            seed: self.seed,
            max_records: self.max_records,
            sibling_backfill: self.sibling_backfill,
            class_year: self.class_year,
            ..GenerateOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `datagen_generate=debug`.
    pub level: String,
    /// JSON log file; logs go to stderr when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

pub fn load_or_create_settings(path: &Path) -> WorkspaceResult<Settings> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = Settings::default();
    save_settings(path, &settings)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> WorkspaceResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(path, encoded.as_bytes())
}
