#![allow(dead_code)]

use adbenv_lib::{AdbEnvError, ArchiveSource, DownloadedArchive, EnvStore, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

/// Entry to put in a test archive; names ending in `/` are directories
pub enum Entry<'a> {
    Dir(&'a str),
    File(&'a str, &'a [u8]),
}

pub fn build_zip(path: &Path, entries: &[Entry<'_>]) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);

    for entry in entries {
        match entry {
            Entry::Dir(name) => {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap();
            }
            Entry::File(name, data) => {
                writer
                    .start_file(
                        *name,
                        SimpleFileOptions::default().unix_permissions(0o755),
                    )
                    .unwrap();
                writer.write_all(data).unwrap();
            }
        }
    }

    writer.finish().unwrap();
}

pub fn zip_bytes(entries: &[Entry<'_>]) -> Vec<u8> {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("archive.zip");
    build_zip(&path, entries);
    std::fs::read(path).unwrap()
}

/// The shape of a platform-tools download
pub fn platform_tools_zip() -> Vec<u8> {
    zip_bytes(&[
        Entry::Dir("platform-tools/"),
        Entry::File("platform-tools/adb.exe", b"adb"),
        Entry::File("platform-tools/fastboot.exe", b"fastboot"),
        Entry::Dir("platform-tools/lib64/"),
        Entry::File("platform-tools/lib64/libc++.so", b"lib"),
    ])
}

/// Relative paths of every file and directory below `root`, sorted
pub fn tree(root: &Path) -> Vec<String> {
    let mut paths: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap();
            let rel = rel.to_string_lossy().replace('\\', "/");
            if e.file_type().is_dir() {
                format!("{}/", rel)
            } else {
                rel
            }
        })
        .collect();
    paths.sort();
    paths
}

/// Serves fixed bytes as the archive
pub struct FixedArchive {
    pub bytes: Vec<u8>,
    pub calls: AtomicUsize,
}

impl FixedArchive {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ArchiveSource for FixedArchive {
    async fn fetch(&self, dest: &Path) -> Result<DownloadedArchive> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::fs::write(dest, &self.bytes)?;
        Ok(DownloadedArchive {
            path: dest.to_path_buf(),
            bytes: self.bytes.len() as u64,
            sha256: "not-computed".into(),
        })
    }
}

/// Answers every fetch with an HTTP status error
pub struct StatusSource(pub u16);

impl ArchiveSource for StatusSource {
    async fn fetch(&self, _dest: &Path) -> Result<DownloadedArchive> {
        Err(AdbEnvError::HttpStatus(self.0))
    }
}

/// In-memory stand-in for `HKCU\Environment\Path`
pub struct MemoryEnvStore {
    value: Mutex<String>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl MemoryEnvStore {
    pub fn new(value: &str) -> Self {
        Self {
            value: Mutex::new(value.to_string()),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn value(&self) -> String {
        self.value.lock().unwrap().clone()
    }

    pub fn touched(&self) -> bool {
        self.reads.load(Ordering::SeqCst) + self.writes.load(Ordering::SeqCst) > 0
    }
}

impl EnvStore for MemoryEnvStore {
    fn read_path(&self) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.value())
    }

    fn write_path(&self, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.value.lock().unwrap() = value.to_string();
        Ok(())
    }
}

pub fn profile_dir(tmp: &tempfile::TempDir) -> (String, PathBuf) {
    let profile = tmp.path().to_string_lossy().to_string();
    let target = tmp.path().join(".adb-env");
    (profile, target)
}
