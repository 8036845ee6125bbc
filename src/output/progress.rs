//! Terminal progress bar.
//!
//! The bar is drawn on stderr and only when stderr is a terminal, so piping
//! or redirecting output never captures control sequences.
//!
//! # Examples
//!
//! ```
//! use merge_pdf::output::progress::ProgressBar;
//!
//! let mut progress = ProgressBar::new(3);
//! progress.set_message("Merging PDF files");
//!
//! for _ in 0..3 {
//!     // Do work...
//!     progress.increment();
//! }
//!
//! progress.finish();
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

const BAR_WIDTH: usize = 30;

/// Progress bar for visual feedback while files are merged.
#[derive(Debug)]
pub struct ProgressBar {
    total: usize,
    current: usize,
    message: Option<String>,
    start_time: Instant,
    last_update: Instant,
    update_interval: Duration,
    enabled: bool,
}

impl ProgressBar {
    /// Create a progress bar for `total` items.
    ///
    /// Drawing is enabled only when stderr is a terminal.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            message: None,
            start_time: Instant::now(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100),
            enabled: io::stderr().is_terminal(),
        }
    }

    /// Create a progress bar that never draws.
    pub fn disabled() -> Self {
        let mut pb = Self::new(0);
        pb.enabled = false;
        pb
    }

    /// Whether this bar draws anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the message shown in front of the bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Advance by one item.
    pub fn increment(&mut self) {
        self.current += 1;

        // Rate limit redraws, but always draw the last step
        if self.last_update.elapsed() < self.update_interval && self.current < self.total {
            return;
        }

        self.last_update = Instant::now();
        self.render();
    }

    /// Mark the bar as complete and move to a new line.
    pub fn finish(&mut self) {
        self.current = self.total;
        if self.enabled {
            self.render();
            eprintln!();
        }
    }

    /// Erase the bar so a message can be printed on a clean line.
    pub fn clear(&self) {
        if self.enabled {
            eprint!("\r\x1b[K");
            io::stderr().flush().ok();
        }
    }

    /// Redraw after a message was printed over a cleared bar.
    pub fn redraw(&mut self) {
        self.render();
    }

    /// Current completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    fn render(&mut self) {
        if !self.enabled {
            return;
        }

        eprint!("\r\x1b[K{}", self.render_bar());
        io::stderr().flush().ok();
    }

    fn render_bar(&self) -> String {
        let filled = (BAR_WIDTH * self.current) / self.total.max(1);
        let filled = filled.min(BAR_WIDTH);
        let empty = BAR_WIDTH - filled;

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let mut parts = vec![
            bar,
            format!("{:.0}%", self.percent()),
            format!("{}/{}", self.current, self.total),
            format_duration(self.start_time.elapsed()),
        ];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
