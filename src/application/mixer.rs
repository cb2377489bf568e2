//! Audio mixing use case

use tracing::debug;

use crate::domain::media::{MediaStream, MediaTrack};

use super::ports::AudioGraph;

/// Combines the audio of several streams into one track
pub struct AudioMixer<G: AudioGraph> {
    graph: G,
}

impl<G: AudioGraph> AudioMixer<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// Mix every audio-bearing stream into one track.
    ///
    /// Streams without audio are skipped. With no audio at all there is
    /// nothing to mix and `None` is returned, so the composed stream carries
    /// no audio track.
    pub fn mix(&self, sources: &[&MediaStream]) -> Option<MediaTrack> {
        let inputs: Vec<MediaTrack> = sources
            .iter()
            .filter(|s| s.has_audio())
            .flat_map(|s| s.audio_tracks().cloned())
            .collect();

        if inputs.is_empty() {
            debug!("No audio sources to mix");
            return None;
        }

        debug!(sources = inputs.len(), "Mixing audio sources");
        Some(self.graph.mix(inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{DeviceInput, TrackKind, TrackSource};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockGraph {
        destinations: AtomicUsize,
    }

    impl MockGraph {
        fn new() -> Self {
            Self {
                destinations: AtomicUsize::new(0),
            }
        }
    }

    impl AudioGraph for MockGraph {
        fn mix(&self, sources: Vec<MediaTrack>) -> MediaTrack {
            self.destinations.fetch_add(1, Ordering::SeqCst);
            MediaTrack::new(
                TrackKind::Audio,
                "mix",
                TrackSource::Mixed(sources.iter().map(|t| t.source().clone()).collect()),
            )
        }
    }

    fn audio_stream(label: &str, device: &str) -> MediaStream {
        MediaStream::with_tracks(vec![MediaTrack::new(
            TrackKind::Audio,
            label,
            TrackSource::Microphone(DeviceInput::new("pulse", device)),
        )])
    }

    fn mixed_sources(track: &MediaTrack) -> usize {
        match track.source() {
            TrackSource::Mixed(sources) => sources.len(),
            _ => 0,
        }
    }

    #[test]
    fn no_audio_sources_yield_no_track() {
        let graph = MockGraph::new();
        let mixer = AudioMixer::new(graph);
        let silent = MediaStream::new();

        assert!(mixer.mix(&[]).is_none());
        assert!(mixer.mix(&[&silent, &silent]).is_none());
        assert_eq!(mixer.graph.destinations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn one_source_yields_one_track() {
        let mixer = AudioMixer::new(MockGraph::new());
        let mic = audio_stream("mic", "default");
        let silent = MediaStream::new();

        let track = mixer.mix(&[&silent, &mic]).unwrap();
        assert_eq!(track.kind(), TrackKind::Audio);
        assert_eq!(mixed_sources(&track), 1);
    }

    #[test]
    fn two_sources_share_one_destination() {
        let mixer = AudioMixer::new(MockGraph::new());
        let system = audio_stream("system", "default.monitor");
        let mic = audio_stream("mic", "default");

        let track = mixer.mix(&[&system, &mic]).unwrap();
        assert_eq!(mixed_sources(&track), 2);
        assert_eq!(mixer.graph.destinations.load(Ordering::SeqCst), 1);
    }
}
