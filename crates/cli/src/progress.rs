//! Progress indicators
//!
//! Spinners for waits on the network or the location provider. They draw
//! to stderr and stay hidden when stderr is not a terminal.

use crate::output::OutputFormat;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner that stays hidden when results are machine-readable
pub fn spinner_for(format: OutputFormat, message: &str) -> ProgressBar {
    if format.is_json() {
        ProgressBar::hidden()
    } else {
        spinner(message)
    }
}

/// Finish a spinner and clear it from the terminal
pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

/// Finish a spinner with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.abandon_with_message(format!("✗ {message}"));
}
