//! Recording export use case

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::catalog::UploadResponse;
use crate::domain::recording::{FinalizedRecording, RecordingFilename};

use super::catalog::RecordingCatalog;
use super::ports::{
    FileSaver, NotificationIcon, Notifier, RecordingStore, SaveError, UploadError,
};

const NOTIFY_TITLE: &str = "Screen Recorder";

/// Hands a finished recording to the local disk or the recordings service
pub struct RecordingExporter<S, F, N>
where
    S: RecordingStore,
    F: FileSaver,
    N: Notifier,
{
    store: S,
    saver: F,
    notifier: N,
    catalog: Arc<RecordingCatalog<S, N>>,
}

impl<S, F, N> RecordingExporter<S, F, N>
where
    S: RecordingStore,
    F: FileSaver,
    N: Notifier,
{
    pub fn new(store: S, saver: F, notifier: N, catalog: Arc<RecordingCatalog<S, N>>) -> Self {
        Self {
            store,
            saver,
            notifier,
            catalog,
        }
    }

    /// Save the recording as `recording_<unixMillis>.webm`, named for the
    /// moment of export.
    pub async fn download_locally(
        &self,
        recording: &FinalizedRecording,
    ) -> Result<PathBuf, SaveError> {
        let filename = RecordingFilename::now();
        match self.saver.save(&filename, recording.data()).await {
            Ok(path) => {
                info!(path = %path.display(), "Recording saved");
                self.notify(
                    &format!("Saved {}", path.display()),
                    NotificationIcon::Success,
                )
                .await;
                Ok(path)
            }
            Err(e) => {
                warn!("{}", e);
                self.notify(&e.to_string(), NotificationIcon::Error).await;
                Err(e)
            }
        }
    }

    /// Upload the recording, then refresh the catalog once.
    ///
    /// The recording itself is left untouched, so a failed upload can be
    /// retried or downloaded instead.
    pub async fn upload(
        &self,
        recording: &FinalizedRecording,
    ) -> Result<UploadResponse, UploadError> {
        let filename = RecordingFilename::now();
        info!(%filename, bytes = recording.size_bytes(), "Uploading recording");

        match self.store.upload(&filename, recording.data().clone()).await {
            Ok(response) => {
                self.notify(&response.message, NotificationIcon::Upload).await;
                // Failure is reported by the catalog itself
                let _ = self.catalog.refresh().await;
                Ok(response)
            }
            Err(e) => {
                warn!("{}", e);
                self.notify("Upload failed", NotificationIcon::Error).await;
                Err(e)
            }
        }
    }

    async fn notify(&self, message: &str, icon: NotificationIcon) {
        if let Err(e) = self.notifier.notify(NOTIFY_TITLE, message, icon).await {
            warn!("Notification failed: {}", e);
        }
    }
}
