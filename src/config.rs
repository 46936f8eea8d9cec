//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_DIR_NAME: &str = ".morning-interview";

/// App data directory, created on first use
pub fn get_app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(APP_DIR_NAME);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
    Ok(dir)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interview: InterviewConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// How long the "thinking" indicator shows before an answer is processed
    #[serde(default = "default_thinking_delay")]
    pub thinking_delay_ms: u64,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay(),
        }
    }
}

fn default_thinking_delay() -> u64 {
    800
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl ExportConfig {
    /// Configured export directory with `~/` expanded, or the working directory
    pub fn directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => expand_home(dir),
            None => PathBuf::from("."),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(load_config()?.unwrap_or_default())
    }
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Invalid config at {:?}", path))?;
    Ok(Some(config))
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_deserialize_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.interview.thinking_delay_ms, 800);
        assert!(config.export.directory.is_none());
    }

    #[test]
    fn test_config_deserialize_partial_toml() {
        let toml = r#"
            [interview]
            thinking_delay_ms = 0
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.interview.thinking_delay_ms, 0);
        assert_eq!(config.export.directory(), PathBuf::from("."));
    }

    #[test]
    #[serial]
    fn test_export_directory_expands_home() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var("HOME", temp.path());

        let export = ExportConfig {
            directory: Some("~/plans".to_string()),
        };
        assert_eq!(export.directory(), temp.path().join("plans"));

        let absolute = ExportConfig {
            directory: Some("/srv/plans".to_string()),
        };
        assert_eq!(absolute.directory(), PathBuf::from("/srv/plans"));
    }

    #[test]
    #[serial]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let temp = tempfile::TempDir::new()?;
        std::env::set_var("HOME", temp.path());

        assert!(load_config()?.is_none());

        let mut config = Config::default();
        config.interview.thinking_delay_ms = 250;
        config.export.directory = Some("~/plans".to_string());
        save_config(&config)?;

        let loaded = Config::load()?;
        assert_eq!(loaded.interview.thinking_delay_ms, 250);
        assert_eq!(loaded.export.directory.as_deref(), Some("~/plans"));
        Ok(())
    }
}
