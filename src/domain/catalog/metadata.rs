//! Server-side recording records

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::recording::human_readable_size;

/// Identifier assigned by the recordings service (numeric or opaque string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A previously uploaded recording, as listed by `GET /api/recordings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingMetadata {
    pub id: RecordingId,
    pub filename: String,
    /// Size in bytes
    pub filesize: u64,
    /// Timestamp as sent by the service, usually RFC 3339
    pub created_at: String,
    /// Path relative to the service base URL
    pub filepath: String,
}

impl RecordingMetadata {
    /// Absolute URL of the stored media
    pub fn media_url(&self, api_url: &str) -> String {
        let base = api_url.trim_end_matches('/');
        if self.filepath.starts_with('/') {
            format!("{}{}", base, self.filepath)
        } else {
            format!("{}/{}", base, self.filepath)
        }
    }

    /// Creation time in the local time zone, or the raw value when it is
    /// not RFC 3339
    pub fn created_at_local(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(at) => at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Err(_) => self.created_at.clone(),
        }
    }

    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.filesize)
    }
}

/// Shown when the service accepts an upload without saying anything
pub const DEFAULT_UPLOAD_MESSAGE: &str = "Recording uploaded";

/// Body returned by `POST /api/recordings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable status from the service
    #[serde(default)]
    pub message: String,
    /// Any further fields the service sends (e.g. the stored record)
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl UploadResponse {
    /// Interpret the body of a successful upload.
    ///
    /// The upload already succeeded at this point, so a body that is not a
    /// JSON object, or one without `message`, gets the default message.
    pub fn from_body(body: &str) -> Self {
        let mut response = serde_json::from_str::<Self>(body).unwrap_or_else(|_| Self {
            message: String::new(),
            details: BTreeMap::new(),
        });
        if response.message.trim().is_empty() {
            response.message = DEFAULT_UPLOAD_MESSAGE.to_string();
        }
        response
    }
}
