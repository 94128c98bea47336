//! Launching a command prompt after install

use crate::error::{AdbEnvError, Result};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// `PATH` for a child process with `dir` appended if missing
pub fn terminal_path(current: Option<OsString>, dir: &Path) -> Result<OsString> {
    let mut paths: Vec<PathBuf> = current
        .map(|value| std::env::split_paths(&value).collect())
        .unwrap_or_default();

    if !paths.iter().any(|p| p == dir) {
        paths.push(dir.to_path_buf());
    }

    std::env::join_paths(paths)
        .map_err(|e| AdbEnvError::Terminal(io::Error::new(io::ErrorKind::InvalidInput, e)))
}

/// Open a visible, detached `cmd.exe` in `dir` with `dir` on its `PATH`.
///
/// The registry change only reaches processes started after the next
/// environment refresh, so the new prompt gets the directory directly.
#[cfg(windows)]
pub fn open_terminal(dir: &Path) -> Result<()> {
    use std::process::Command;
    use tracing::info;

    let cmd = which::which("cmd").unwrap_or_else(|_| PathBuf::from("cmd"));
    let path = terminal_path(std::env::var_os("PATH"), dir)?;

    info!("Launching {:?} in {:?}", cmd, dir);
    Command::new(cmd)
        .args(["/C", "start", "cmd.exe"])
        .current_dir(dir)
        .env("PATH", path)
        .spawn()
        .map_err(AdbEnvError::Terminal)?;
    Ok(())
}

#[cfg(not(windows))]
pub fn open_terminal(_dir: &Path) -> Result<()> {
    Err(AdbEnvError::Unsupported("Opening a command prompt"))
}
