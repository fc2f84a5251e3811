use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::STORE_FILENAME;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Answers that are remembered between runs and offered as defaults.
pub const STORED_KEYS: [&str; 4] = ["name", "email", "website", "githubUsername"];

/// Prompt values persisted in the generated project.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnswers {
    #[serde(default)]
    pub prompt_values: IndexMap<String, String>,
}

impl StoredAnswers {
    pub fn path<P: AsRef<Path>>(project_root: P) -> PathBuf {
        project_root.as_ref().join(STORE_FILENAME)
    }

    /// Loads stored answers; a missing file yields an empty store.
    pub fn load<P: AsRef<Path>>(project_root: P) -> Result<Self> {
        let path = Self::path(&project_root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, project_root: P) -> Result<()> {
        let path = Self::path(&project_root);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_yaml::to_string(self)?;
        std::fs::write(path, serialized).map_err(Error::from)
    }

    /// A non-empty stored value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.prompt_values.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Captures the remembered subset of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let prompt_values = STORED_KEYS
            .iter()
            .filter_map(|key| {
                settings.lookup(key).map(|value| (key.to_string(), value.to_string()))
            })
            .collect();
        Self { prompt_values }
    }
}
