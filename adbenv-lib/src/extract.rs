//! ZIP extraction with single-root stripping
//!
//! Platform tool archives wrap everything in one top-level directory
//! (`platform-tools/adb.exe`, ...). That directory is removed so the tools land
//! directly in the install directory.

use crate::error::{AdbEnvError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// Counts of what an extraction wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub dirs: usize,
}

/// Top-level directory shared by every entry name, if any.
///
/// Returns `None` for flat archives, for archives whose entries live under
/// different top-level names and for empty archives. In those cases nothing
/// is stripped.
pub fn root_prefix<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut root: Option<&str> = None;
    let mut nested = false;

    for name in names {
        let (first, rest) = match name.split_once('/') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };

        match root {
            None => root = Some(first),
            Some(existing) if existing == first => {}
            Some(_) => return None,
        }

        if rest.is_some() {
            nested = true;
        }
    }

    match root {
        Some(root) if nested && !root.is_empty() => Some(root.to_string()),
        _ => None,
    }
}

/// Extract `archive_path` into `target_dir`, stripping the shared root.
///
/// Stops at the first error; whatever was written so far stays on disk.
pub fn extract_archive(archive_path: &Path, target_dir: &Path) -> Result<ExtractSummary> {
    let file = File::open(archive_path).map_err(|source| AdbEnvError::Extract {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(file)?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let prefix = root_prefix(names.iter().map(String::as_str));
    info!(
        "Extracting {} entries from {:?} (stripping {:?})",
        archive.len(),
        archive_path,
        prefix
    );

    let mut summary = ExtractSummary::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let enclosed = entry
            .enclosed_name()
            .ok_or_else(|| AdbEnvError::UnsafeEntry(entry.name().to_string()))?;

        let relative = strip_root(&enclosed, prefix.as_deref());
        if relative.as_os_str().is_empty() {
            // The root directory entry itself
            continue;
        }
        let out_path = target_dir.join(&relative);

        if entry.is_dir() {
            debug!("Creating directory {:?}", out_path);
            fs::create_dir_all(&out_path).map_err(|source| AdbEnvError::CreateDir {
                path: out_path.clone(),
                source,
            })?;
            summary.dirs += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|source| AdbEnvError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut out_file = File::create(&out_path).map_err(|source| AdbEnvError::CreateFile {
            path: out_path.clone(),
            source,
        })?;
        io::copy(&mut entry, &mut out_file).map_err(|source| AdbEnvError::Extract {
            path: out_path.clone(),
            source,
        })?;

        apply_mode(&out_path, entry.unix_mode()).map_err(|source| AdbEnvError::Extract {
            path: out_path.clone(),
            source,
        })?;

        debug!("Extracted {:?}", out_path);
        summary.files += 1;
    }

    info!(
        "Extracted {} files and {} directories into {:?}",
        summary.files, summary.dirs, target_dir
    );
    Ok(summary)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    match mode {
        Some(mode) if mode & 0o777 != 0 => {
            fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
        }
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> io::Result<()> {
    Ok(())
}

fn strip_root(path: &Path, prefix: Option<&str>) -> PathBuf {
    match prefix {
        Some(prefix) => path
            .strip_prefix(prefix)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf()),
        None => path.to_path_buf(),
    }
}
