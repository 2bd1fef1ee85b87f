//! Scratch Files
//!
//! The validators only read their input from files, so every request owns a
//! uniquely named file for the duration of one validator run. The file is
//! removed when its guard is dropped, whichever way the request ends.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::Result;

/// A file under the scratch directory that is deleted on drop
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// `<dir>/<prefix><uuid>`
    pub fn unique_path(dir: &Path, prefix: &str) -> PathBuf {
        dir.join(format!("{}{}", prefix, Uuid::new_v4()))
    }

    /// Create a new file holding `contents`, synced to disk before returning
    /// so a validator started afterwards reads it complete.
    pub async fn with_contents(dir: &Path, prefix: &str, contents: &[u8]) -> Result<Self> {
        let path = Self::unique_path(dir, prefix);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        let guard = Self { path };

        file.write_all(contents).await?;
        file.flush().await?;
        file.sync_all().await?;
        log::debug!("wrote {} bytes to {}", contents.len(), guard.path.display());

        Ok(guard)
    }

    /// Create a new empty file and hand back a handle open for writing
    pub fn empty(dir: &Path, prefix: &str) -> Result<(Self, File)> {
        let path = Self::unique_path(dir, prefix);
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;

        Ok((Self { path }, file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // Drop cannot await; a single unlink is short enough to run inline.
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("scratch file {} was already gone", self.path.display());
            }
            Err(e) => {
                log::warn!("failed to remove scratch file {}: {}", self.path.display(), e);
            }
        }
    }
}
