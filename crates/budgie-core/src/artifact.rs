//! Model artifact bootstrap
//!
//! Makes sure the local model file exists before the server starts. A missing
//! file is streamed from the configured URL into `<path>.part`, verified when
//! a SHA-256 is configured, then renamed into place. A partial download never
//! appears at the final path.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::ArtifactSettings;
use crate::error::{Error, Result};

/// Outcome of [`ensure_model_artifact`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

/// Download the model file unless it is already on disk
pub async fn ensure_model_artifact(settings: &ArtifactSettings) -> Result<ArtifactStatus> {
    if fs::try_exists(&settings.path).await? {
        debug!(path = %settings.path.display(), "Model artifact already present");
        return Ok(ArtifactStatus::AlreadyPresent);
    }

    info!(url = %settings.url, path = %settings.path.display(), "Downloading model artifact");

    if let Some(parent) = settings.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let part_path = part_path(&settings.path);
    let result = download(settings, &part_path).await;

    let (bytes, digest) = match result {
        Ok(done) => done,
        Err(e) => {
            let _ = fs::remove_file(&part_path).await;
            return Err(e);
        }
    };

    if let Some(expected) = settings.sha256.as_deref() {
        if !digest.eq_ignore_ascii_case(expected.trim()) {
            let _ = fs::remove_file(&part_path).await;
            return Err(Error::Artifact(format!(
                "Checksum mismatch for {}: expected {}, got {}",
                settings.url, expected, digest
            )));
        }
    }

    fs::rename(&part_path, &settings.path).await?;
    info!(bytes, path = %settings.path.display(), "Model artifact downloaded");

    Ok(ArtifactStatus::Downloaded { bytes })
}

/// Stream the response body to `dest`, returning the byte count and hex SHA-256
async fn download(settings: &ArtifactSettings, dest: &Path) -> Result<(u64, String)> {
    let mut response = reqwest::get(&settings.url).await?;
    if !response.status().is_success() {
        return Err(Error::Artifact(format!(
            "Download of {} failed with status {}",
            settings.url,
            response.status()
        )));
    }

    let file = fs::File::create(dest).await?;
    let mut writer = ChunkedWriter::new(file, settings.chunk_size);
    let mut hasher = Sha256::new();
    let mut bytes = 0u64;

    while let Some(chunk) = response.chunk().await? {
        hasher.update(&chunk);
        writer.push(&chunk).await?;
        bytes += chunk.len() as u64;
    }
    writer.finish().await?;

    Ok((bytes, hex::encode(hasher.finalize())))
}

/// Regroups network chunks of any size into writes of exactly `chunk_size`
/// bytes; only the final write may be shorter.
struct ChunkedWriter<W> {
    inner: W,
    buf: Vec<u8>,
    chunk_size: usize,
}

impl<W: AsyncWrite + Unpin> ChunkedWriter<W> {
    fn new(inner: W, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            inner,
            buf: Vec::with_capacity(chunk_size),
            chunk_size,
        }
    }

    async fn push(&mut self, mut data: &[u8]) -> std::io::Result<()> {
        while !data.is_empty() {
            let take = (self.chunk_size - self.buf.len()).min(data.len());
            self.buf.extend_from_slice(&data[..take]);
            data = &data[take..];
            if self.buf.len() == self.chunk_size {
                self.inner.write_all(&self.buf).await?;
                self.buf.clear();
            }
        }
        Ok(())
    }

    async fn finish(mut self) -> std::io::Result<W> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf).await?;
        }
        self.inner.flush().await?;
        Ok(self.inner)
    }
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
