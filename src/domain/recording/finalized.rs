//! Finalized recording value object

use std::fmt;

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};

/// Container format of every recording
pub const WEBM_MIME_TYPE: &str = "video/webm";

/// File name of an exported recording: `recording_<unixMillis>.webm`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingFilename(String);

impl RecordingFilename {
    /// File name for the given instant
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(format!("recording_{}.webm", instant.timestamp_millis()))
    }

    /// File name for the current time
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable result of one recording session: the chunk sequence joined into
/// a single `video/webm` blob.
#[derive(Debug, Clone)]
pub struct FinalizedRecording {
    data: Bytes,
    filename: RecordingFilename,
    created_at: DateTime<Utc>,
}

impl FinalizedRecording {
    /// Join chunks in order into one blob
    pub fn assemble(chunks: &[Bytes], created_at: DateTime<Utc>) -> Self {
        let total = chunks.iter().map(Bytes::len).sum();
        let mut data = BytesMut::with_capacity(total);
        for chunk in chunks {
            data.extend_from_slice(chunk);
        }

        Self {
            data: data.freeze(),
            filename: RecordingFilename::at(created_at),
            created_at,
        }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn filename(&self) -> &RecordingFilename {
        &self.filename
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn mime_type(&self) -> &'static str {
        WEBM_MIME_TYPE
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes() as u64)
    }
}

/// Format a byte count as B / KB / MB
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    #[test]
    fn filename_uses_unix_millis() {
        assert_eq!(
            RecordingFilename::at(instant()).as_str(),
            "recording_1700000000123.webm"
        );
    }

    #[test]
    fn assemble_preserves_chunk_order() {
        let chunks = vec![
            Bytes::from_static(b"abc"),
            Bytes::from_static(b"de"),
            Bytes::from_static(b"f"),
        ];
        let recording = FinalizedRecording::assemble(&chunks, instant());

        assert_eq!(recording.data().as_ref(), b"abcdef");
        assert_eq!(recording.size_bytes(), 6);
        assert_eq!(recording.mime_type(), "video/webm");
        assert_eq!(recording.filename().as_str(), "recording_1700000000123.webm");
    }

    #[test]
    fn assemble_with_no_chunks_is_empty() {
        let recording = FinalizedRecording::assemble(&[], instant());
        assert!(recording.is_empty());
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(human_readable_size(500), "500 B");
        assert_eq!(human_readable_size(2048), "2.0 KB");
        assert_eq!(human_readable_size(2 * 1024 * 1024), "2.0 MB");
    }
}
