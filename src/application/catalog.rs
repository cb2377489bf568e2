//! Recording catalog use case

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::catalog::RecordingMetadata;

use super::ports::{FetchError, NotificationIcon, Notifier, RecordingStore};

/// Holds the list of recordings known to the service
pub struct RecordingCatalog<S: RecordingStore, N: Notifier> {
    store: S,
    notifier: N,
    recordings: RwLock<Vec<RecordingMetadata>>,
}

impl<S: RecordingStore, N: Notifier> RecordingCatalog<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            recordings: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the list and replace the held copy.
    ///
    /// On failure the user is notified and the previous list is kept.
    pub async fn refresh(&self) -> Result<Vec<RecordingMetadata>, FetchError> {
        match self.store.list().await {
            Ok(list) => {
                debug!(count = list.len(), "Catalog refreshed");
                *self.recordings.write().await = list.clone();
                Ok(list)
            }
            Err(e) => {
                warn!("{}", e);
                if let Err(ne) = self
                    .notifier
                    .notify("Screen Recorder", "Failed to fetch recordings", NotificationIcon::Error)
                    .await
                {
                    warn!("Notification failed: {}", ne);
                }
                Err(e)
            }
        }
    }

    /// Last successfully fetched list
    pub async fn recordings(&self) -> Vec<RecordingMetadata> {
        self.recordings.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NotificationError, UploadError};
    use crate::domain::catalog::{RecordingId, UploadResponse};
    use crate::domain::recording::RecordingFilename;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    struct MockStore {
        responses: Mutex<Vec<Result<Vec<RecordingMetadata>, FetchError>>>,
    }

    #[async_trait]
    impl RecordingStore for MockStore {
        async fn upload(
            &self,
            _filename: &RecordingFilename,
            _data: Bytes,
        ) -> Result<UploadResponse, UploadError> {
            unreachable!("catalog never uploads")
        }

        async fn list(&self) -> Result<Vec<RecordingMetadata>, FetchError> {
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[derive(Default)]
    struct MockNotifier {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(
            &self,
            _title: &str,
            message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            self.messages.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    fn record(id: i64) -> RecordingMetadata {
        RecordingMetadata {
            id: RecordingId::Number(id),
            filename: format!("recording_{}.webm", id),
            filesize: 10,
            created_at: "2024-05-01T10:00:00Z".to_string(),
            filepath: format!("/uploads/recording_{}.webm", id),
        }
    }

    #[tokio::test]
    async fn refresh_replaces_list() {
        let catalog = RecordingCatalog::new(
            MockStore {
                responses: Mutex::new(vec![Ok(vec![record(1)]), Ok(vec![record(1), record(2)])]),
            },
            MockNotifier::default(),
        );

        assert_eq!(catalog.refresh().await.unwrap().len(), 1);
        assert_eq!(catalog.refresh().await.unwrap().len(), 2);
        assert_eq!(catalog.recordings().await.len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list_and_notifies() {
        let catalog = RecordingCatalog::new(
            MockStore {
                responses: Mutex::new(vec![
                    Ok(vec![record(1)]),
                    Err(FetchError::Rejected { status: 500 }),
                ]),
            },
            MockNotifier::default(),
        );

        catalog.refresh().await.unwrap();
        assert!(catalog.refresh().await.is_err());

        assert_eq!(catalog.recordings().await, vec![record(1)]);
        assert_eq!(
            *catalog.notifier.messages.lock().unwrap(),
            vec!["Failed to fetch recordings".to_string()]
        );
    }
}
