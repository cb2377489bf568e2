//! Media stream and track value objects

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Kind of media carried by a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A capture device as seen by the host: the driver that opens it and the
/// device name understood by that driver (e.g. `x11grab` + `:0.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceInput {
    pub driver: String,
    pub device: String,
}

impl DeviceInput {
    pub fn new(driver: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            device: device.into(),
        }
    }
}

impl fmt::Display for DeviceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.driver, self.device)
    }
}

/// Where the media of a track originates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSource {
    /// On-screen video of a display
    Display(DeviceInput),
    /// Audio played by the system (loopback / monitor)
    SystemAudio(DeviceInput),
    /// Microphone input
    Microphone(DeviceInput),
    /// Output of an audio mixing destination
    Mixed(Vec<TrackSource>),
}

impl TrackSource {
    /// Leaf capture devices feeding this source, in connection order
    pub fn devices(&self) -> Vec<&DeviceInput> {
        match self {
            Self::Display(input) | Self::SystemAudio(input) | Self::Microphone(input) => {
                vec![input]
            }
            Self::Mixed(sources) => sources.iter().flat_map(|s| s.devices()).collect(),
        }
    }
}

/// A single media track.
///
/// Clones refer to the same underlying capture: stopping any clone ends the
/// track for every holder.
#[derive(Debug, Clone)]
pub struct MediaTrack {
    kind: TrackKind,
    label: String,
    source: TrackSource,
    ended: Arc<AtomicBool>,
}

impl MediaTrack {
    pub fn new(kind: TrackKind, label: impl Into<String>, source: TrackSource) -> Self {
        Self {
            kind,
            label: label.into(),
            source,
            ended: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &TrackSource {
        &self.source
    }

    /// Whether the track is still delivering media
    pub fn is_live(&self) -> bool {
        !self.ended.load(Ordering::SeqCst)
    }

    /// Release the capture behind this track
    pub fn stop(&self) {
        self.ended.store(true, Ordering::SeqCst);
    }

    /// Whether both handles refer to the same capture
    pub fn same_track(&self, other: &MediaTrack) -> bool {
        Arc::ptr_eq(&self.ended, &other.ended)
    }
}

/// An ordered set of tracks acquired from the host
#[derive(Debug, Clone, Default)]
pub struct MediaStream {
    tracks: Vec<MediaTrack>,
}

impl MediaStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracks(tracks: Vec<MediaTrack>) -> Self {
        Self { tracks }
    }

    pub fn add_track(&mut self, track: MediaTrack) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks_of(TrackKind::Video)
    }

    pub fn audio_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks_of(TrackKind::Audio)
    }

    pub fn has_audio(&self) -> bool {
        self.audio_tracks().next().is_some()
    }

    /// True while at least one track is live
    pub fn is_active(&self) -> bool {
        self.tracks.iter().any(MediaTrack::is_live)
    }

    /// Stop every track, releasing the devices behind them
    pub fn stop(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }

    fn tracks_of(&self, kind: TrackKind) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(move |t| t.kind() == kind)
    }
}

/// The stream handed to the recorder: display video plus at most one mixed
/// audio track. Tracks are shared with the streams they were taken from.
#[derive(Debug, Clone)]
pub struct CombinedStream {
    stream: MediaStream,
}

impl CombinedStream {
    pub(crate) fn from_stream(stream: MediaStream) -> Self {
        Self { stream }
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        self.stream.tracks()
    }

    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.stream.video_tracks()
    }

    pub fn audio_track(&self) -> Option<&MediaTrack> {
        self.stream.audio_tracks().next()
    }

    pub fn audio_track_count(&self) -> usize {
        self.stream.audio_tracks().count()
    }

    pub fn stop(&self) {
        self.stream.stop();
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_active()
    }
}
