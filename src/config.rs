use crate::error::{ConsoleError, Result};
use assets_console_common::ConsoleConfig;
use std::path::{Path, PathBuf};

/// `~/.config/assets-console/config.json`
pub struct Config;

impl Config {
    pub fn load() -> Result<ConsoleConfig> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<ConsoleConfig> {
        if path.exists() {
            Ok(ConsoleConfig::from_file(path)?)
        } else {
            Ok(ConsoleConfig::default())
        }
    }

    pub fn save(config: &ConsoleConfig) -> Result<()> {
        Self::save_to(config, &Self::config_path()?)
    }

    pub fn save_to(config: &ConsoleConfig, path: &Path) -> Result<()> {
        config.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConsoleError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("assets-console").join("config.json"))
    }
}
