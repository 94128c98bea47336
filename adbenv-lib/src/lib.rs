//! ADB & Fastboot Environment Installer Library
//!
//! Downloads the Android platform tools, unpacks them into
//! `%USERPROFILE%\.adb-env` and registers that directory on the user `Path`.

pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod installer;
pub mod path_env;
pub mod registry;
pub mod state;
pub mod terminal;

pub use self::config::Config;
pub use download::{ArchiveSource, DownloadManager, DownloadedArchive};
pub use error::{AdbEnvError, Result};
pub use extract::{extract_archive, ExtractSummary};
pub use installer::{InstallReport, InstallStatus, Installer, UninstallReport};
pub use registry::{EnvStore, RegistryEnvStore};
pub use state::{InstallState, QUIT_EXIT_CODE};
pub use terminal::open_terminal;
