//! FFmpeg-backed stream source adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{AcquireError, StreamSource};
use crate::domain::media::{DeviceInput, MediaStream, MediaTrack, TrackKind, TrackSource};

use super::backend::CaptureBackend;

/// How long a probe reads from a device
const PROBE_SECS: &str = "0.2";

/// Host stream source that checks each device with a short FFmpeg probe
/// before handing out tracks for it.
pub struct FfmpegStreamSource {
    backend: CaptureBackend,
    binary: String,
}

impl FfmpegStreamSource {
    pub fn new(backend: CaptureBackend) -> Self {
        Self::with_binary(backend, "ffmpeg")
    }

    /// Use a specific ffmpeg executable
    pub fn with_binary(backend: CaptureBackend, binary: impl Into<String>) -> Self {
        Self {
            backend,
            binary: binary.into(),
        }
    }

    fn probe_args(input: &DeviceInput) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-nostdin".to_string(),
            "-f".to_string(),
            input.driver.clone(),
            "-t".to_string(),
            PROBE_SECS.to_string(),
            "-i".to_string(),
            input.device.clone(),
            "-f".to_string(),
            "null".to_string(),
            "-".to_string(),
        ]
    }

    /// Open the device briefly; the host refuses here if access is not granted
    async fn probe(&self, input: &DeviceInput) -> Result<(), AcquireError> {
        debug!(%input, "Probing capture device");
        let output = Command::new(&self.binary)
            .args(Self::probe_args(input))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AcquireError::DeviceUnavailable(format!("{} not found in PATH", self.binary))
                } else {
                    AcquireError::DeviceUnavailable(e.to_string())
                }
            })?;

        if output.status.success() {
            return Ok(());
        }
        Err(classify_failure(
            input,
            &String::from_utf8_lossy(&output.stderr),
        ))
    }
}

/// Map a failed probe's stderr onto the acquisition error taxonomy
pub(crate) fn classify_failure(input: &DeviceInput, stderr: &str) -> AcquireError {
    let lower = stderr.to_lowercase();
    let denied = ["permission denied", "operation not permitted", "not authorized"]
        .iter()
        .any(|needle| lower.contains(needle));

    let detail = stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("device could not be opened")
        .trim();

    if denied {
        AcquireError::PermissionDenied(format!("{}: {}", input, detail))
    } else {
        AcquireError::DeviceUnavailable(format!("{}: {}", input, detail))
    }
}

#[async_trait]
impl StreamSource for FfmpegStreamSource {
    async fn acquire_display(&self) -> Result<MediaStream, AcquireError> {
        self.probe(&self.backend.display).await?;
        let mut stream = MediaStream::with_tracks(vec![MediaTrack::new(
            TrackKind::Video,
            "screen",
            TrackSource::Display(self.backend.display.clone()),
        )]);

        // A missing loopback only costs the system audio track
        if let Some(monitor) = &self.backend.system_audio {
            match self.probe(monitor).await {
                Ok(()) => stream.add_track(MediaTrack::new(
                    TrackKind::Audio,
                    "system audio",
                    TrackSource::SystemAudio(monitor.clone()),
                )),
                Err(e) => debug!("System audio unavailable: {}", e),
            }
        }

        Ok(stream)
    }

    async fn acquire_microphone(&self) -> Result<MediaStream, AcquireError> {
        self.probe(&self.backend.microphone).await?;
        Ok(MediaStream::with_tracks(vec![MediaTrack::new(
            TrackKind::Audio,
            "microphone",
            TrackSource::Microphone(self.backend.microphone.clone()),
        )]))
    }
}
