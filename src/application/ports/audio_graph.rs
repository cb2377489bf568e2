//! Audio processing graph port interface

use crate::domain::media::MediaTrack;

/// Port for the host audio graph.
///
/// One call creates one mixing destination, connects every source track to
/// it, and returns the destination's single output track. Callers never
/// pass an empty source list.
pub trait AudioGraph: Send + Sync {
    fn mix(&self, sources: Vec<MediaTrack>) -> MediaTrack;
}
