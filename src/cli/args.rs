//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Screen Recorder - capture the screen with system audio and microphone
#[derive(Parser, Debug)]
#[command(name = "screen-recorder")]
#[command(version)]
#[command(about = "Record the screen with mixed system and microphone audio, then save or upload it")]
#[command(long_about = None)]
pub struct Cli {
    /// Base URL of the recordings service
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory for local downloads
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Display to capture (e.g. :1.0)
    #[arg(long, value_name = "DISPLAY")]
    pub display: Option<String>,

    /// Record without system audio
    #[arg(long)]
    pub no_system_audio: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_url",
    "download_dir",
    "notify",
    "display",
    "system_audio",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
