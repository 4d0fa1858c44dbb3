//! Wires the platform backend into the capture loop.

use std::sync::Arc;

use screenlapse_core::{CaptureConfig, CaptureError, RunStats, StatusReporter, StopHandle};

#[cfg(target_os = "windows")]
pub fn run_capture(
    config: CaptureConfig,
    stop: StopHandle,
    reporter: Arc<dyn StatusReporter>,
) -> Result<RunStats, CaptureError> {
    use screenlapse_core::CaptureLoop;
    use screenlapse_windows::{console, ForegroundProcess, GdiScreenCapturer};

    let mut capture = CaptureLoop::new(config, GdiScreenCapturer::new(), ForegroundProcess::new())?
        .with_stop_handle(stop.clone());
    capture.set_reporter(reporter);
    console::install_stop_handler(stop)?;

    Ok(capture.run())
}

#[cfg(not(target_os = "windows"))]
pub fn run_capture(
    config: CaptureConfig,
    _stop: StopHandle,
    _reporter: Arc<dyn StatusReporter>,
) -> Result<RunStats, CaptureError> {
    // Still reject bad filter patterns before reporting the missing backend.
    screenlapse_core::ProcessFilter::new(config.include.as_slice(), config.exclude.as_slice())?;
    Err(CaptureError::PlatformUnavailable)
}
