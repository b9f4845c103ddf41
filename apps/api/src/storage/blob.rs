use std::path::{Path, PathBuf};

use tempfile::TempPath;
use thiserror::Error;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

/// Prefix of in-progress upload files in the store root. Never addressable by name.
const TEMP_PREFIX: &str = ".upload-";

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("file storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a blob ended up and how many bytes were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Write-once file store rooted at a local directory.
///
/// Blobs are addressed by the final component of their name. Writing a name
/// that already exists replaces it; concurrent writers race and the last
/// rename wins, but a reader never sees a mix of two payloads.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a client-supplied name onto its location under the root.
    /// Directory parts are discarded, so `../x.pdf` and `uploads/x.pdf` both
    /// resolve to `<root>/x.pdf`. In-progress upload files cannot be named.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, BlobError> {
        let file_name = Path::new(name.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.trim().is_empty() && !n.starts_with(TEMP_PREFIX))
            .ok_or_else(|| BlobError::InvalidName(name.to_string()))?;
        Ok(self.root.join(file_name))
    }

    /// Opens a writer for `name`. Nothing is visible at the destination until
    /// [`BlobWriter::finish`] succeeds; dropping the writer discards the data.
    pub async fn create(&self, name: &str) -> Result<BlobWriter, BlobError> {
        let dest = self.resolve(name)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let root = self.root.clone();
        let temp = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(TEMP_PREFIX)
                .tempfile_in(root)
        })
        .await
        .map_err(std::io::Error::other)??;
        let (file, temp_path) = temp.into_parts();

        Ok(BlobWriter {
            file: tokio::fs::File::from_std(file),
            temp_path,
            dest,
        })
    }
}

/// An in-progress blob write backed by a temporary file in the store root.
#[derive(Debug)]
pub struct BlobWriter {
    file: tokio::fs::File,
    temp_path: TempPath,
    dest: PathBuf,
}

impl BlobWriter {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), BlobError> {
        self.file.write_all(chunk).await?;
        Ok(())
    }

    /// Flushes the data and renames it onto the destination.
    pub async fn finish(self) -> Result<StoredBlob, BlobError> {
        let BlobWriter {
            mut file,
            temp_path,
            dest,
        } = self;

        file.flush().await?;
        // Size is the writer's position, not a re-read of the stored file.
        let size_bytes = file.stream_position().await?;
        drop(file);

        temp_path.persist(&dest).map_err(|e| BlobError::Io(e.error))?;
        debug!("Stored {size_bytes} bytes at {}", dest.display());

        Ok(StoredBlob {
            path: dest,
            size_bytes,
        })
    }
}
