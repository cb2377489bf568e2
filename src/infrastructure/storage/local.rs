//! Local download directory adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{FileSaver, SaveError};
use crate::domain::recording::RecordingFilename;

/// Writes recordings into a directory, creating it when missing
pub struct LocalFileSaver {
    dir: PathBuf,
}

impl LocalFileSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl FileSaver for LocalFileSaver {
    async fn save(&self, filename: &RecordingFilename, data: &[u8]) -> Result<PathBuf, SaveError> {
        let path = self.dir.join(filename.as_str());
        let write_failed = |e: std::io::Error| SaveError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).await.map_err(write_failed)?;
        fs::write(&path, data).await.map_err(write_failed)?;
        Ok(path)
    }
}
