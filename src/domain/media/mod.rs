//! Media streams, tracks and stream composition

mod composer;
mod stream;

pub use composer::compose;
pub use stream::{CombinedStream, DeviceInput, MediaStream, MediaTrack, TrackKind, TrackSource};
