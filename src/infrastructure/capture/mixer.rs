//! FFmpeg audio graph adapter

use tracing::debug;

use crate::application::ports::AudioGraph;
use crate::domain::media::{MediaTrack, TrackKind, TrackSource};

/// Describes a mix as an FFmpeg `amix` destination.
///
/// No audio flows here: the recorder turns the resulting
/// [`TrackSource::Mixed`] into one `amix` filter over its leaf devices.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegAudioGraph;

impl FfmpegAudioGraph {
    pub fn new() -> Self {
        Self
    }
}

impl AudioGraph for FfmpegAudioGraph {
    fn mix(&self, sources: Vec<MediaTrack>) -> MediaTrack {
        let inputs: Vec<TrackSource> = sources.iter().map(|t| t.source().clone()).collect();
        debug!(inputs = inputs.len(), "Audio mix destination created");
        MediaTrack::new(TrackKind::Audio, "mixed audio", TrackSource::Mixed(inputs))
    }
}
