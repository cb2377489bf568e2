//! Storage infrastructure module
//!
//! The remote recordings service and the local download directory.

mod http;
mod local;

pub use http::HttpRecordingStore;
pub use local::LocalFileSaver;
