use std::io::{self, Write};

use screenlapse_core::{CaptureError, LoopState, RunStats, StatusReporter};

/// Single-line console status, rewritten in place after every tick.
#[derive(Debug, Default)]
pub struct ConsoleStatus;

impl ConsoleStatus {
    pub fn new() -> Self {
        Self
    }
}

impl StatusReporter for ConsoleStatus {
    fn on_state_changed(&self, state: LoopState) {
        if state.is_terminal() {
            log::debug!("Capture loop terminated");
        }
    }

    fn on_statistics(&self, stats: &RunStats) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "\r{}", status_line(stats));
        let _ = out.flush();
    }

    fn on_error(&self, error: &CaptureError) {
        log::debug!("Tick failed: {}", error);
    }
}

fn status_line(stats: &RunStats) -> String {
    let last = stats
        .last_capture_at
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "Captures: {}, Index: {}, Skipped: {}, Failed: {}, Last: {}   ",
        stats.capture_count, stats.output_index, stats.skipped, stats.failed, last
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_shows_counters() {
        let stats = RunStats {
            capture_count: 12,
            output_index: 14,
            skipped: 3,
            failed: 1,
            ..Default::default()
        };
        let line = status_line(&stats);
        assert!(line.starts_with("Captures: 12, Index: 14, Skipped: 3, Failed: 1, Last: -"));
    }
}
