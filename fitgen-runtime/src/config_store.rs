use crate::settings::RelaySettings;
use anyhow::Context;
use std::path::PathBuf;

/// Optional JSON settings file for the relay server.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing keys fall back to defaults. The API key is never read from the file.
    pub fn load(&self) -> anyhow::Result<RelaySettings> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read settings: {}", self.path.display()))?;
        let settings: RelaySettings =
            serde_json::from_slice(&bytes).context("decode settings JSON")?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{DEFAULT_BIND, DEFAULT_LLM_BASE_URL};

    #[test]
    fn loads_partial_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitgen.json");
        std::fs::write(&path, r#"{"llm_model":"llama-3.3-70b-versatile"}"#).unwrap();

        let loaded = SettingsStore::at_path(&path).load().unwrap();
        assert_eq!(loaded.llm_model, "llama-3.3-70b-versatile");
        assert_eq!(loaded.bind, DEFAULT_BIND);
        assert_eq!(loaded.llm_base_url, DEFAULT_LLM_BASE_URL);
    }

    #[test]
    fn ignores_api_key_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitgen.json");
        std::fs::write(&path, r#"{"api_key":"gsk_in_file"}"#).unwrap();

        let loaded = SettingsStore::at_path(&path).load().unwrap();
        assert_eq!(loaded.api_key, None);
    }

    #[test]
    fn missing_file_is_an_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = SettingsStore::at_path(&path).load().unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitgen.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(SettingsStore::at_path(&path).load().is_err());
    }
}
