//! Error types for the installer

use std::path::PathBuf;
use thiserror::Error;

/// Installer result type
pub type Result<T> = std::result::Result<T, AdbEnvError>;

/// Main error type for installer operations
///
/// Each variant names the step that failed and carries the underlying
/// OS, network, archive or registry error text, so `to_string()` is
/// suitable for showing directly to the user.
#[derive(Error, Debug)]
pub enum AdbEnvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("Unable to read the USERPROFILE environment variable")]
    MissingUserProfile,

    #[error("Unable to remove directory {}: {source}", .path.display())]
    RemoveDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to store downloaded file {}: {source}", .path.display())]
    StoreDownload {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to download file: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned non-200 status code: {0}")]
    HttpStatus(u16),

    #[error("Unable to open archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Unable to extract {}: {source}", .path.display())]
    Extract {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Archive entry escapes the target directory: {0}")]
    UnsafeEntry(String),

    #[error("Unable to remove file {}: {source}", .path.display())]
    RemoveArchive {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to open registry key: {0}")]
    RegistryOpen(std::io::Error),

    #[error("Unable to read the Path value: {0}")]
    RegistryRead(std::io::Error),

    #[error("Unable to set the new Path value: {0}")]
    RegistryWrite(std::io::Error),

    #[error("Unable to launch terminal: {0}")]
    Terminal(std::io::Error),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("{0} is only supported on Windows")]
    Unsupported(&'static str),
}
