use crate::shared::paths::{ensure_dir, get_data_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How mutating operations treat a task index outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Out-of-range indices are reported as errors.
    #[default]
    Strict,
    /// Out-of-range indices are logged and ignored, matching the behavior
    /// of the earliest console builds.
    Lenient,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub index_policy: IndexPolicy,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn get_settings_path() -> PathBuf {
    get_data_dir().join("settings.json")
}

pub fn load_settings() -> AppSettings {
    let path = get_settings_path();

    if !path.exists() {
        return AppSettings::default();
    }

    load_settings_from_file(&path).unwrap_or_default()
}

fn load_settings_from_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}

pub fn save_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    let data_dir = get_data_dir();
    ensure_dir(&data_dir)?;

    let path = get_settings_path();
    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_strict() {
        assert_eq!(AppSettings::default().index_policy, IndexPolicy::Strict);
    }

    #[test]
    fn test_policy_serializes_lowercase() {
        let json = serde_json::to_string(&IndexPolicy::Lenient).unwrap();
        assert_eq!(json, "\"lenient\"");
    }

    #[test]
    fn test_settings_tolerate_missing_fields() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.index_policy, IndexPolicy::Strict);
    }
}
