//! Install flow: reset directory, download, extract, register on Path

use crate::config::Config;
use crate::download::ArchiveSource;
use crate::error::{AdbEnvError, Result};
use crate::extract::{extract_archive, ExtractSummary};
use crate::path_env;
use crate::registry::EnvStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Outcome of a successful install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub target_dir: PathBuf,
    pub archive_bytes: u64,
    pub archive_sha256: String,
    pub extracted: ExtractSummary,
    /// Entry as written to Path, e.g. `%USERPROFILE%\.adb-env`
    pub path_entry: String,
    /// False when Path already listed the install directory
    pub path_updated: bool,
}

/// Current state of an installation on this machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStatus {
    pub target_dir: PathBuf,
    pub installed: bool,
    pub file_count: usize,
    pub on_path: bool,
}

/// Outcome of an uninstall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallReport {
    pub target_dir: PathBuf,
    pub removed_dir: bool,
    pub path_updated: bool,
}

/// Installer for a single user profile
pub struct Installer<S, E> {
    config: Config,
    source: S,
    env: E,
}

impl<S, E: EnvStore> Installer<S, E> {
    /// Create a new installer
    pub fn new(config: Config, source: S, env: E) -> Self {
        Self { config, source, env }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn checked_target_dir(&self, user_profile: &str) -> Result<PathBuf> {
        if user_profile.is_empty() {
            return Err(AdbEnvError::MissingUserProfile);
        }
        Ok(self.config.target_dir(user_profile))
    }

    /// Report what is installed without changing anything
    pub fn status(&self, user_profile: &str) -> Result<InstallStatus> {
        let target_dir = self.checked_target_dir(user_profile)?;
        let installed = target_dir.is_dir();
        let file_count = if installed {
            WalkDir::new(&target_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .count()
        } else {
            0
        };

        let entry = self.config.path_entry();
        let expanded = target_dir.to_string_lossy();
        let current = self.env.read_path()?;
        let on_path = path_env::contains_entry(&current, &[entry.as_str(), expanded.as_ref()]);

        Ok(InstallStatus {
            target_dir,
            installed,
            file_count,
            on_path,
        })
    }

    /// Remove the install directory and its Path entry
    pub fn uninstall(&self, user_profile: &str) -> Result<UninstallReport> {
        let target_dir = self.checked_target_dir(user_profile)?;

        let removed_dir = if target_dir.exists() {
            info!("Removing {:?}", target_dir);
            fs::remove_dir_all(&target_dir).map_err(|source| AdbEnvError::RemoveDir {
                path: target_dir.clone(),
                source,
            })?;
            true
        } else {
            info!("{:?} does not exist, nothing to remove", target_dir);
            false
        };

        let entry = self.config.path_entry();
        let expanded = target_dir.to_string_lossy();
        let current = self.env.read_path()?;
        let spellings = [entry.as_str(), expanded.as_ref()];
        let path_updated = match path_env::remove_entry(&current, &spellings) {
            Some(updated) => {
                self.env.write_path(&updated)?;
                info!("Removed {} from Path", entry);
                true
            }
            None => false,
        };

        Ok(UninstallReport {
            target_dir,
            removed_dir,
            path_updated,
        })
    }

    /// Append the install directory to Path unless already present
    fn register_path(&self, target_dir: &Path) -> Result<bool> {
        let entry = self.config.path_entry();
        let expanded = target_dir.to_string_lossy();
        let current = self.env.read_path()?;

        match path_env::append_entry_with_aliases(&current, &entry, &[expanded.as_ref()]) {
            Some(updated) => {
                self.env.write_path(&updated)?;
                info!("Added {} to Path", entry);
                Ok(true)
            }
            None => {
                info!("Path already contains {}", entry);
                Ok(false)
            }
        }
    }
}

impl<S: ArchiveSource, E: EnvStore> Installer<S, E> {
    /// Run the full install for `user_profile`.
    ///
    /// The first failing step aborts; earlier steps are not rolled back.
    pub async fn install(&self, user_profile: &str) -> Result<InstallReport> {
        let start_time = Instant::now();
        let target_dir = self.checked_target_dir(user_profile)?;
        info!("Installing platform tools into {:?}", target_dir);

        reset_dir(&target_dir)?;

        let archive_path = self.config.archive_path(&target_dir);
        let archive = self.source.fetch(&archive_path).await?;
        info!("Fetched {} bytes (sha256 {})", archive.bytes, archive.sha256);

        let extracted = {
            let archive_path = archive.path.clone();
            let target_dir = target_dir.clone();
            tokio::task::spawn_blocking(move || extract_archive(&archive_path, &target_dir))
                .await
                .map_err(|e| AdbEnvError::Task(e.to_string()))??
        };

        fs::remove_file(&archive.path).map_err(|source| AdbEnvError::RemoveArchive {
            path: archive.path.clone(),
            source,
        })?;

        let path_updated = self.register_path(&target_dir)?;

        let duration = start_time.elapsed();
        info!(
            "Installed into {:?} in {}.{:03}s",
            target_dir,
            duration.as_secs(),
            duration.subsec_millis()
        );

        Ok(InstallReport {
            target_dir,
            archive_bytes: archive.bytes,
            archive_sha256: archive.sha256,
            extracted,
            path_entry: self.config.path_entry(),
            path_updated,
        })
    }
}

/// Delete `dir` if present, then create it empty
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        warn!("Removing existing {:?}", dir);
        fs::remove_dir_all(dir).map_err(|source| AdbEnvError::RemoveDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    fs::create_dir(dir).map_err(|source| AdbEnvError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
