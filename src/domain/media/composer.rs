//! Stream composition

use super::stream::{CombinedStream, MediaStream, MediaTrack};

/// Build the stream handed to the recorder.
///
/// Takes every video track of `video_source` and the mixed audio track, if
/// any. Tracks are shared, not copied: stopping the combined stream stops
/// the display capture too.
pub fn compose(video_source: &MediaStream, mixed_audio: Option<MediaTrack>) -> CombinedStream {
    let mut combined = MediaStream::new();
    for track in video_source.video_tracks() {
        combined.add_track(track.clone());
    }
    if let Some(track) = mixed_audio {
        combined.add_track(track);
    }
    CombinedStream::from_stream(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{DeviceInput, TrackKind, TrackSource};

    fn screen_with_system_audio() -> MediaStream {
        MediaStream::with_tracks(vec![
            MediaTrack::new(
                TrackKind::Video,
                "screen",
                TrackSource::Display(DeviceInput::new("x11grab", ":0.0")),
            ),
            MediaTrack::new(
                TrackKind::Audio,
                "system",
                TrackSource::SystemAudio(DeviceInput::new("pulse", "default.monitor")),
            ),
        ])
    }

    #[test]
    fn takes_video_only_from_display_stream() {
        let screen = screen_with_system_audio();
        let combined = compose(&screen, None);

        assert_eq!(combined.video_tracks().count(), 1);
        assert_eq!(combined.audio_track_count(), 0);
    }

    #[test]
    fn adds_mixed_audio_track() {
        let screen = screen_with_system_audio();
        let mixed = MediaTrack::new(TrackKind::Audio, "mix", TrackSource::Mixed(vec![]));
        let combined = compose(&screen, Some(mixed.clone()));

        assert_eq!(combined.audio_track_count(), 1);
        assert!(combined.audio_track().unwrap().same_track(&mixed));
        assert_eq!(combined.tracks()[0].kind(), TrackKind::Video);
        assert_eq!(combined.tracks()[1].kind(), TrackKind::Audio);
    }

    #[test]
    fn shares_video_tracks_by_reference() {
        let screen = screen_with_system_audio();
        let combined = compose(&screen, None);

        combined.stop();
        assert!(!screen.tracks()[0].is_live());
        // The system audio track was not part of the combined stream
        assert!(screen.tracks()[1].is_live());
    }
}
