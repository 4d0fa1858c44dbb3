use crate::models::error::CaptureError;
use crate::models::state::{LoopState, RunStats};

/// Event sink for capture loop notifications.
///
/// All methods are called from the loop thread, between ticks.
pub trait StatusReporter {
    /// Called when the loop state changes.
    fn on_state_changed(&self, state: LoopState);

    /// Called after every tick with the updated counters.
    fn on_statistics(&self, stats: &RunStats);

    /// Called when a tick fails. The loop keeps running.
    fn on_error(&self, error: &CaptureError);
}
