//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the interactive
//! prompt and the config subcommand.

pub mod app;
pub mod args;
pub mod commands;
pub mod config_cmd;
pub mod console_notifier;
pub mod input;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_interactive, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use commands::UiCommand;
pub use console_notifier::ConsoleNotifier;
pub use presenter::Presenter;
