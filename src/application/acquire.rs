//! Stream acquisition use case

use tracing::{debug, warn};

use crate::domain::media::{MediaStream, MediaTrack};

use super::ports::{AcquireError, StreamSource};

/// Display and microphone streams acquired for one session
#[derive(Debug)]
pub struct AcquiredStreams {
    pub display: MediaStream,
    pub microphone: MediaStream,
}

impl AcquiredStreams {
    /// Release every device behind both streams
    pub fn release(&self) {
        self.display.stop();
        self.microphone.stop();
    }
}

fn track_labels(stream: &MediaStream) -> Vec<&str> {
    stream.tracks().iter().map(MediaTrack::label).collect()
}

/// Requests the display and microphone streams a session needs
pub struct StreamAcquirer<S: StreamSource> {
    source: S,
}

impl<S: StreamSource> StreamAcquirer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn acquire_display_stream(&self) -> Result<MediaStream, AcquireError> {
        let stream = self.source.acquire_display().await?;
        debug!(
            video = stream.video_tracks().count(),
            audio = stream.audio_tracks().count(),
            tracks = ?track_labels(&stream),
            "Display stream acquired"
        );
        Ok(stream)
    }

    pub async fn acquire_mic_stream(&self) -> Result<MediaStream, AcquireError> {
        let stream = self.source.acquire_microphone().await?;
        debug!(
            audio = stream.audio_tracks().count(),
            tracks = ?track_labels(&stream),
            "Microphone stream acquired"
        );
        Ok(stream)
    }

    /// Acquire display then microphone. If the microphone is refused the
    /// display stream is released before the error is returned.
    pub async fn acquire_all(&self) -> Result<AcquiredStreams, AcquireError> {
        let display = self.acquire_display_stream().await?;
        match self.acquire_mic_stream().await {
            Ok(microphone) => Ok(AcquiredStreams {
                display,
                microphone,
            }),
            Err(e) => {
                warn!("Microphone acquisition failed, releasing display: {}", e);
                display.stop();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{DeviceInput, MediaTrack, TrackKind, TrackSource};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSource {
        display: MediaStream,
        mic_error: Option<AcquireError>,
    }

    #[async_trait]
    impl StreamSource for MockSource {
        async fn acquire_display(&self) -> Result<MediaStream, AcquireError> {
            Ok(self.display.clone())
        }

        async fn acquire_microphone(&self) -> Result<MediaStream, AcquireError> {
            match &self.mic_error {
                Some(e) => Err(e.clone()),
                None => Ok(MediaStream::new()),
            }
        }
    }

    struct DeniedSource {
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl StreamSource for DeniedSource {
        async fn acquire_display(&self) -> Result<MediaStream, AcquireError> {
            self.calls.lock().unwrap().push("display");
            Err(AcquireError::PermissionDenied("screen".to_string()))
        }

        async fn acquire_microphone(&self) -> Result<MediaStream, AcquireError> {
            self.calls.lock().unwrap().push("mic");
            Ok(MediaStream::new())
        }
    }

    fn screen() -> MediaStream {
        MediaStream::with_tracks(vec![MediaTrack::new(
            TrackKind::Video,
            "screen",
            TrackSource::Display(DeviceInput::new("x11grab", ":0.0")),
        )])
    }

    #[tokio::test]
    async fn acquires_both_streams() {
        let acquirer = StreamAcquirer::new(MockSource {
            display: screen(),
            mic_error: None,
        });

        let streams = acquirer.acquire_all().await.unwrap();
        assert_eq!(streams.display.video_tracks().count(), 1);
        assert!(streams.display.is_active());
    }

    #[tokio::test]
    async fn mic_failure_releases_display() {
        let display = screen();
        let acquirer = StreamAcquirer::new(MockSource {
            display: display.clone(),
            mic_error: Some(AcquireError::DeviceUnavailable("no mic".to_string())),
        });

        let err = acquirer.acquire_all().await.unwrap_err();
        assert_eq!(err, AcquireError::DeviceUnavailable("no mic".to_string()));
        assert!(!display.is_active());
    }

    #[tokio::test]
    async fn display_denial_skips_microphone() {
        let acquirer = StreamAcquirer::new(DeniedSource {
            calls: Mutex::new(Vec::new()),
        });

        let err = acquirer.acquire_all().await.unwrap_err();
        assert!(matches!(err, AcquireError::PermissionDenied(_)));
        assert_eq!(*acquirer.source.calls.lock().unwrap(), vec!["display"]);
    }

    #[test]
    fn labels_follow_track_order() {
        let mut stream = screen();
        stream.add_track(MediaTrack::new(
            TrackKind::Audio,
            "system audio",
            TrackSource::SystemAudio(DeviceInput::new("pulse", "@DEFAULT_MONITOR@")),
        ));

        assert_eq!(track_labels(&stream), vec!["screen", "system audio"]);
    }
}
