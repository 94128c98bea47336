//! Configuration management for the installer

use crate::error::{AdbEnvError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default archive with the latest Windows platform tools
pub const DEFAULT_DOWNLOAD_URL: &str =
    "https://googledownloads.cn/android/repository/platform-tools-latest-windows.zip";

/// Environment variable holding the Windows user home
pub const USER_PROFILE_VAR: &str = "USERPROFILE";

/// Prefix for environment overrides (`ADBENV_DOWNLOAD_URL`, ...)
const ENV_PREFIX: &str = "ADBENV";

/// Installer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Archive to download
    pub download_url: String,

    /// Directory created under the user profile
    pub install_dir_name: String,

    /// File name of the temporary archive inside the install directory
    pub archive_name: String,

    /// User agent sent with the download request
    pub user_agent: String,

    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            install_dir_name: ".adb-env".to_string(),
            archive_name: "platform-tools.zip".to_string(),
            user_agent: format!("adb-env-installer/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file and
    /// `ADBENV_*` environment variables, in that order of precedence.
    ///
    /// When `file` is `None` the per-user config file is used if it exists.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        match file {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                builder = builder.add_source(::config::File::from(path).required(true));
            }
            None => {
                if let Some(path) = Self::default_config_file() {
                    debug!("Looking for configuration at {:?}", path);
                    builder = builder.add_source(::config::File::from(path).required(false));
                }
            }
        }

        let config: Config = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Per-user config file (`<config_dir>/adb-env/config.toml`)
    pub fn default_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("adb-env").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.download_url.trim().is_empty() {
            return Err(AdbEnvError::Config("download_url must not be empty".into()));
        }
        if self.install_dir_name.is_empty()
            || self.install_dir_name.contains(['/', '\\'])
            || self.install_dir_name == ".."
        {
            return Err(AdbEnvError::Config(format!(
                "install_dir_name must be a single directory name, got {:?}",
                self.install_dir_name
            )));
        }
        if self.archive_name.is_empty() || self.archive_name.contains(['/', '\\']) {
            return Err(AdbEnvError::Config(format!(
                "archive_name must be a plain file name, got {:?}",
                self.archive_name
            )));
        }
        Ok(())
    }

    /// Read the user profile directory from the environment
    pub fn user_profile() -> Result<String> {
        std::env::var(USER_PROFILE_VAR)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or(AdbEnvError::MissingUserProfile)
    }

    /// Install directory for the given user profile
    pub fn target_dir(&self, user_profile: &str) -> PathBuf {
        Path::new(user_profile).join(&self.install_dir_name)
    }

    /// Downloaded archive location inside the install directory
    pub fn archive_path(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(&self.archive_name)
    }

    /// Unexpanded Path entry, e.g. `%USERPROFILE%\.adb-env`
    pub fn path_entry(&self) -> String {
        format!("%{}%\\{}", USER_PROFILE_VAR, self.install_dir_name)
    }
}
