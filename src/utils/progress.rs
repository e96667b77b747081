//! Load progress display using indicatif
//!
//! Drawn on stderr and hidden automatically when stderr is not a terminal,
//! so piped and exported output is never interleaved with bar redraws.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar wrapper for displaying load status
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    /// Create a byte-based progress bar for a file of known size
    pub fn new(total_bytes: usize, label: &str) -> Self {
        let bar = IndicatifBar::new(total_bytes as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {percent:>3}% ({bytes}/{total_bytes}) {eta}")
                .expect("Invalid progress bar template")
                .progress_chars("█░"),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// Create a line-counting spinner for input of unknown size
    pub fn new_spinner(label: &str) -> Self {
        let bar = IndicatifBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg} {spinner} {pos} lines")
                .expect("Invalid spinner template"),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// Update progress
    pub fn update(&self, current: usize) {
        self.bar.set_position(current as u64);
    }

    /// Remove the bar once loading is complete
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
