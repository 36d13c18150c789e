use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File read when nothing else names a dataset.
pub const DEFAULT_DATA_PATH: &str = "preprocessed_data.csv";

/// Runtime settings.
///
/// Optional JSON file layout (every key may be omitted):
///
/// ```json
/// { "data_path": "survey/preprocessed_data.csv", "window_size": [1400.0, 900.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Merge the config file (if any) with a dataset path given on the
    /// command line or through `SURVEY_FILTER_DATA`; the latter wins.
    pub fn resolve(config_file: Option<&Path>, data_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = data_override {
            config.data_path = path;
        }
        log::debug!("Using config {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file_or_override() {
        let config = AppConfig::resolve(None, None).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn file_values_fill_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(&path, r#"{ "data_path": "other.csv" }"#).unwrap();

        let config = AppConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.window_size, AppConfig::default().window_size);
    }

    #[test]
    fn override_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(&path, r#"{ "data_path": "other.csv" }"#).unwrap();

        let config = AppConfig::resolve(Some(&path), Some("cli.csv".into())).unwrap();
        assert_eq!(config.data_path, PathBuf::from("cli.csv"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::resolve(Some(&path), None).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config file"));
    }
}
