//! Notification infrastructure module
//!
//! Desktop notifications via notify-rust, and a fan-out that combines
//! them with terminal output.

mod fanout;
mod notify_rust;

pub use fanout::FanoutNotifier;
pub use self::notify_rust::{NotifyRustNotifier, APP_NAME};
