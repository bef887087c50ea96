use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    #[serde(default = "default_menu_name")]
    pub name: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            name: default_menu_name(),
        }
    }
}

fn default_menu_name() -> String {
    "bookmarks".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceConfig {
    /// Path to a JSON bookmark export file (an array of
    /// `{title, url, tags}` records).
    pub export: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.menu.name.trim().is_empty() {
        anyhow::bail!("menu.name must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bkm.toml");
        fs::write(&path, "[store]\npath = \"data/menu.sqlite\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.path, PathBuf::from("data/menu.sqlite"));
        assert_eq!(config.menu.name, "bookmarks");
        assert!(config.source.export.is_none());
    }

    #[test]
    fn test_rejects_empty_menu_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bkm.toml");
        fs::write(
            &path,
            "[store]\npath = \"menu.sqlite\"\n\n[menu]\nname = \"\"\n",
        )
        .unwrap();

        assert!(load_config(&path).is_err());
    }
}
