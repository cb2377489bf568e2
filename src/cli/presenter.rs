//! CLI presenter for output formatting

use std::io::{self, Write};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::SessionSnapshot;
use crate::domain::catalog::RecordingMetadata;
use crate::domain::recording::SessionState;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    pub fn is_spinner_active(&self) -> bool {
        self.spinner.is_some()
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.print_err(format!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.print_err(format!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.print_err(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.print_err(format!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout without newline
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format the session timer with a bar against the ceiling
    pub fn format_timer(&self, elapsed_secs: u64, ceiling_secs: u64) -> String {
        let ratio = if ceiling_secs > 0 {
            (elapsed_secs as f64 / ceiling_secs as f64).min(1.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = (ratio * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "Timer: {} seconds [{}{}] {}s max",
            elapsed_secs,
            "█".repeat(filled).red(),
            "░".repeat(empty),
            ceiling_secs
        )
    }

    /// One-line description of the session
    pub fn format_status(&self, snapshot: &SessionSnapshot) -> String {
        match snapshot.state {
            SessionState::Idle => "Idle".to_string(),
            SessionState::Recording => {
                format!("Recording - {}", self.format_timer(snapshot.elapsed_secs, snapshot.ceiling_secs))
            }
            SessionState::Finalizing => "Finalizing recording...".to_string(),
            SessionState::Stopped if snapshot.recording_ready => format!(
                "Stopped after {} seconds, recording ready (download / upload)",
                snapshot.elapsed_secs
            ),
            SessionState::Stopped => "Stopped".to_string(),
        }
    }

    /// Catalog entry: `filename - N bytes - local time`
    pub fn format_recording(&self, record: &RecordingMetadata) -> String {
        format!(
            "{} - {} bytes - {}",
            record.filename,
            record.filesize,
            record.created_at_local()
        )
    }

    /// Render a session snapshot: spinner while recording, cleared otherwise
    pub fn render_session(&mut self, snapshot: &SessionSnapshot) {
        match snapshot.state {
            SessionState::Recording | SessionState::Finalizing => {
                let line = self.format_status(snapshot);
                if self.is_spinner_active() {
                    self.update_spinner(&line);
                } else {
                    self.start_spinner(&line);
                }
            }
            SessionState::Idle | SessionState::Stopped => self.stop_spinner(),
        }
    }

    /// Print to stderr without tearing an active spinner
    fn print_err(&self, line: String) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
