//! Local file saving port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::RecordingFilename;

/// Save errors
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    #[error("Failed to save recording to {path}: {message}")]
    WriteFailed { path: String, message: String },
}

/// Port for saving a recording on the local machine
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Save `data` under `filename`.
    ///
    /// # Returns
    /// The full path of the written file
    async fn save(&self, filename: &RecordingFilename, data: &[u8]) -> Result<PathBuf, SaveError>;
}
