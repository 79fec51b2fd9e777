use clap::ValueEnum;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{constants, utils::paths::get_absolute_path};

#[derive(Serialize, Deserialize, PartialEq, Clone, Copy, Debug, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Chirpy,
    Normal,
    Stfu,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Chirpy
    }
}

impl LogLevel {
    /// filter directive used when `RUST_LOG` is not set
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Chirpy => "debug",
            Self::Normal => "info",
            Self::Stfu => "warn",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    #[serde(skip_serializing_if = "is_default")]
    blog_path: String,

    #[serde(skip_serializing_if = "is_default")]
    assets_path: String,

    #[serde(skip_serializing_if = "is_default")]
    ui_path: String,

    port: u16,

    log_level: LogLevel,
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    value == &T::default()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            blog_path: String::new(),
            assets_path: String::new(),
            ui_path: String::new(),
            port: constants::DEFAULT_PORT,
            log_level: LogLevel::default(),
        }
    }
}

impl CliConfig {
    pub fn get_config_filepath() -> io::Result<PathBuf> {
        match env::var(constants::ENV_CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => get_absolute_path(path),
            _ => get_absolute_path(Path::new(constants::CONFIG_DIR).join(constants::CONFIG_FILENAME)),
        }
    }

    /// config file first, then `BLOG_PATH`/`ASSETS_PATH`/`UI_PATH` from the environment
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::load_from(&Self::get_config_filepath()?)?;

        Ok(config.with_env_overrides(|key| env::var(key).ok()))
    }

    /// a missing file is created with the default config
    pub fn load_from(config_filepath: &Path) -> anyhow::Result<Self> {
        let file_contents = match fs::read_to_string(config_filepath) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let default_config = CliConfig::default();
                default_config.save_to(config_filepath)?;
                return Ok(default_config);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(toml::from_str(&file_contents)?)
    }

    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(blog_path) = lookup(constants::ENV_BLOG_PATH) {
            self.blog_path = blog_path;
        }
        if let Some(assets_path) = lookup(constants::ENV_ASSETS_PATH) {
            self.assets_path = assets_path;
        }
        if let Some(ui_path) = lookup(constants::ENV_UI_PATH) {
            self.ui_path = ui_path;
        }

        self
    }

    pub fn save_to(&self, config_filepath: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_filepath.parent() {
            fs::DirBuilder::new().recursive(true).create(parent)?;
        }

        let toml_str = toml::to_string(&self)?;
        fs::write(config_filepath, toml_str)?;

        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(&self)?)
    }

    pub fn get_blog_path(&self) -> &str {
        self.blog_path.as_str()
    }

    pub fn get_assets_path(&self) -> &str {
        self.assets_path.as_str()
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_blog_path(&mut self, blog_path: String) {
        self.blog_path = blog_path;
    }

    pub fn set_assets_path(&mut self, assets_path: String) {
        self.assets_path = assets_path;
    }

    pub fn set_ui_path(&mut self, ui_path: String) {
        self.ui_path = ui_path;
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// absolute blog root, empty when unset
    pub fn get_blog_dir(&self) -> io::Result<PathBuf> {
        resolve_dir(&self.blog_path)
    }

    /// absolute assets root, empty when unset
    pub fn get_assets_dir(&self) -> io::Result<PathBuf> {
        resolve_dir(&self.assets_path)
    }

    /// falls back to `<executable dir>/assets/editor-ui`
    pub fn get_ui_dir(&self) -> io::Result<PathBuf> {
        if !self.ui_path.trim().is_empty() {
            return get_absolute_path(&self.ui_path);
        }

        let exe_path = env::current_exe()?;
        let exe_dir = exe_path.parent().unwrap_or(Path::new("."));

        Ok(exe_dir.join(constants::DEFAULT_UI_DIR))
    }
}

fn resolve_dir(raw: &str) -> io::Result<PathBuf> {
    if raw.trim().is_empty() {
        return Ok(PathBuf::new());
    }

    get_absolute_path(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_file_is_created_with_defaults() {
        let temp = TempDir::new().unwrap();
        let config_filepath = temp.path().join("nested").join("config.toml");

        let config = CliConfig::load_from(&config_filepath).unwrap();

        assert_eq!(config, CliConfig::default());
        assert!(config_filepath.exists());
        assert_eq!(config.get_port(), constants::DEFAULT_PORT);
    }

    #[test]
    fn test_partial_config_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let config_filepath = temp.path().join("config.toml");
        fs::write(&config_filepath, "blog_path = \"/srv/blog\"\nlog_level = \"stfu\"\n").unwrap();

        let config = CliConfig::load_from(&config_filepath).unwrap();

        assert_eq!(config.get_blog_path(), "/srv/blog");
        assert_eq!(config.get_assets_path(), "");
        assert_eq!(config.get_port(), constants::DEFAULT_PORT);
        assert_eq!(config.get_log_level(), LogLevel::Stfu);
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let temp = TempDir::new().unwrap();
        let config_filepath = temp.path().join("config.toml");

        let mut config = CliConfig::default();
        config.set_assets_path("/srv/assets".to_string());
        config.set_port(4000);
        config.save_to(&config_filepath).unwrap();

        let saved = fs::read_to_string(&config_filepath).unwrap();
        assert!(!saved.contains("blog_path"));

        let loaded = CliConfig::load_from(&config_filepath).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let mut config = CliConfig::default();
        config.set_blog_path("/from/file".to_string());

        let config = config.with_env_overrides(|key| match key {
            constants::ENV_BLOG_PATH => Some("/from/env".to_string()),
            _ => None,
        });

        assert_eq!(config.get_blog_path(), "/from/env");
        assert_eq!(config.get_assets_path(), "");
    }

    #[test]
    fn test_empty_roots_resolve_to_empty_paths() {
        let config = CliConfig::default();

        assert_eq!(config.get_blog_dir().unwrap(), PathBuf::new());
        assert_eq!(config.get_assets_dir().unwrap(), PathBuf::new());
    }

    #[test]
    fn test_log_level_filters() {
        assert_eq!(LogLevel::Chirpy.as_filter(), "debug");
        assert_eq!(LogLevel::Normal.as_filter(), "info");
        assert_eq!(LogLevel::Stfu.as_filter(), "warn");
    }
}
