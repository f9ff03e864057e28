//! Terminal progress bar for a running solve

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::algorithm::outcome::{SolveOutcome, SolveStats};
use crate::io::configuration::PROGRESS_BAR_WIDTH;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Filled-cell progress for one generation run
///
/// Backtracking moves the bar backwards; the prefix shows how many
/// rollbacks the current attempt has made.
pub struct SolveProgress {
    bar: ProgressBar,
}

impl SolveProgress {
    /// Create a visible bar for a grid of `total_cells`
    pub fn new(total_cells: usize) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(SOLVE_STYLE.clone());
        Self { bar }
    }

    /// Create a bar that tracks state without drawing
    pub fn hidden(total_cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_cells as u64);
        Self { bar }
    }

    /// Report the counters of the given attempt
    pub fn update(&self, attempt: usize, stats: &SolveStats) {
        self.bar.set_position(stats.filled as u64);
        self.bar.set_message(format!("attempt {attempt}"));
        self.bar.set_prefix(format!(
            "{} backtracks, {} clears",
            stats.backtracks, stats.block_clears
        ));
    }

    /// Cells filled at the last update
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total cells tracked
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Stop drawing and leave the final outcome on screen
    ///
    /// Only a solved run fills the bar; any other outcome keeps the last
    /// filled count.
    pub fn finish(&self, outcome: &SolveOutcome) {
        if outcome.is_solved() {
            self.bar.finish_with_message(outcome.label());
        } else {
            self.bar.abandon_with_message(outcome.label());
        }
    }
}
