//! Archive download over HTTPS

use crate::config::Config;
use crate::error::{AdbEnvError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// A downloaded archive on disk
#[derive(Debug, Clone)]
pub struct DownloadedArchive {
    pub path: PathBuf,
    pub bytes: u64,
    /// Hex SHA-256 of the body, recorded for diagnostics only
    pub sha256: String,
}

/// Where the install flow gets its archive from
pub trait ArchiveSource {
    /// Write the archive to `dest` and describe what was written
    fn fetch(&self, dest: &Path) -> impl Future<Output = Result<DownloadedArchive>> + Send;
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for &T {
    fn fetch(&self, dest: &Path) -> impl Future<Output = Result<DownloadedArchive>> + Send {
        (**self).fetch(dest)
    }
}

/// Download manager
pub struct DownloadManager {
    client: Client,
    url: String,
    progress: bool,
}

impl DownloadManager {
    /// Create a new download manager for the configured archive
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: config.download_url.clone(),
            progress: false,
        })
    }

    /// Use a prebuilt client for `url`
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            progress: false,
        }
    }

    /// Draw a progress bar while fetching
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Archive URL this manager fetches
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the archive to `dest`, streaming the body straight to disk.
    ///
    /// Any status other than 200 is an error and leaves `dest` untouched.
    pub async fn download(&self, dest: &Path) -> Result<DownloadedArchive> {
        info!("Downloading {} to {:?}", self.url, dest);
        let mut response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AdbEnvError::HttpStatus(status.as_u16()));
        }

        let total_size = response.content_length().unwrap_or(0);

        let pb = if self.progress && total_size > 0 {
            let pb = ProgressBar::new(total_size);
            let style = ProgressStyle::default_bar()
                .template("{msg} {bar:40.cyan/blue} {bytes}/{total_bytes} {eta}")
                .map_err(|e| AdbEnvError::Config(format!("Progress bar template error: {}", e)))?;
            pb.set_style(style);
            pb.set_message("Downloading");
            Some(pb)
        } else {
            None
        };

        let mut file = std::fs::File::create(dest).map_err(|source| AdbEnvError::CreateFile {
            path: dest.to_path_buf(),
            source,
        })?;
        let mut hasher = Sha256::new();
        let mut bytes = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).map_err(|source| AdbEnvError::StoreDownload {
                path: dest.to_path_buf(),
                source,
            })?;
            hasher.update(&chunk);
            bytes += chunk.len() as u64;

            if let Some(ref pb) = pb {
                pb.inc(chunk.len() as u64);
            }
        }

        file.flush().map_err(|source| AdbEnvError::StoreDownload {
            path: dest.to_path_buf(),
            source,
        })?;

        if let Some(pb) = pb {
            pb.finish_with_message("Downloaded");
        }

        let sha256 = format!("{:x}", hasher.finalize());
        debug!("Downloaded {} bytes, sha256 {}", bytes, sha256);

        Ok(DownloadedArchive {
            path: dest.to_path_buf(),
            bytes,
            sha256,
        })
    }
}

impl ArchiveSource for DownloadManager {
    async fn fetch(&self, dest: &Path) -> Result<DownloadedArchive> {
        self.download(dest).await
    }
}
