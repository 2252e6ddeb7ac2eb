use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the to-do backend, without a trailing slash.
    pub api_url: String,
    /// List shown when `tasks` is run without `--list`.
    pub default_list: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_list: None,
        }
    }
}

impl AppConfig {
    /// Config with `TODOVIEW_API_URL` applied on top.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("TODOVIEW_API_URL")
            && !url.trim().is_empty()
        {
            self.api_url = url;
        }
        self
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path()).with_env_overrides()
}

pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig) -> Result<PathBuf> {
    let path = config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("serialize config")?;
    std::fs::write(path, contents).with_context(|| format!("write config {}", path.display()))
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TODOVIEW_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

pub(crate) fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("TODOVIEW_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("todoview");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("todoview");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(data) = dirs::data_dir() {
            return data.join("todoview");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("todoview");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".todoview")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            api_url: "https://todo.example.com".into(),
            default_list: Some("list-1".into()),
        };
        save_config_to(&config, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("api_url = \"https://todo.example.com\""));
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_partial_or_broken_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "default_list = \"abc\"\n").unwrap();
        let config = load_config_from(&path);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.default_list.as_deref(), Some("abc"));

        std::fs::write(&path, "api_url = [").unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());
    }
}
