use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::error::CaptureError;

/// Capture loop state machine.
///
/// State transitions:
/// ```text
/// idle → waiting → capturing → waiting → … → terminated
/// ```
/// Only a stop request moves the loop to `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Waiting,
    Capturing,
    Terminated,
}

impl LoopState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}

/// Counters for the current run. Never reset while the process lives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Frames successfully written.
    pub capture_count: u64,
    /// Lowest index that may still be free. Only advances on collisions.
    pub output_index: u64,
    /// Ticks with no focused process or a rejected one.
    pub skipped: u64,
    /// Ticks whose capture, path resolution or save failed.
    pub failed: u64,
    /// Ticks whose work took longer than the interval.
    pub overruns: u64,
    pub last_capture_at: Option<DateTime<Utc>>,
}

/// Why a tick did not capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoActiveProcess,
    Filtered(String),
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Captured(PathBuf),
    Skipped(SkipReason),
    Failed(CaptureError),
}

impl TickOutcome {
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured(_))
    }
}
