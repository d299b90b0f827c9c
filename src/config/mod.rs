use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::{expand_db_path, expand_tilde};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
pub const DEFAULT_WRAP_WIDTH: usize = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}
fn default_confirm_delete() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            date_format: default_date_format(),
            wrap_width: default_wrap_width(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtodo")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtodo")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtodo.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtodo.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        cfg.database = expand_db_path(&cfg.database);
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Resolve a user supplied database name against the config dir.
    fn resolve_db_path(dir: &Path, name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() { p } else { dir.join(p) }
    }

    /// Initialize configuration and database files.
    ///
    /// In test mode the config file is left untouched. Returns the
    /// configuration that was written (or would have been).
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) if is_test => expand_tilde(name),
            Some(name) => Self::resolve_db_path(&dir, name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            config.save_to(&Self::config_file())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
