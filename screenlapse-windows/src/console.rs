//! Console control handler.
//!
//! Ctrl-C, Ctrl-Break and closing the console window all fire the installed
//! `StopHandle` instead of killing the process, so the capture loop can finish
//! its current tick and release its buffers.

use std::sync::OnceLock;

use windows::core::BOOL;
use windows::Win32::System::Console::{SetConsoleCtrlHandler, CTRL_BREAK_EVENT, CTRL_CLOSE_EVENT, CTRL_C_EVENT};

use screenlapse_core::models::error::CaptureError;
use screenlapse_core::session::capture_loop::StopHandle;

static STOP: OnceLock<StopHandle> = OnceLock::new();

/// Route console stop events to `stop`. Only the first call registers.
pub fn install_stop_handler(stop: StopHandle) -> Result<(), CaptureError> {
    if STOP.set(stop).is_err() {
        log::debug!("Console stop handler already installed");
        return Ok(());
    }
    unsafe {
        SetConsoleCtrlHandler(Some(on_console_event), true)
            .map_err(|e| CaptureError::Platform(format!("SetConsoleCtrlHandler failed: {}", e)))
    }
}

unsafe extern "system" fn on_console_event(event: u32) -> BOOL {
    match event {
        CTRL_C_EVENT | CTRL_BREAK_EVENT | CTRL_CLOSE_EVENT => {
            if let Some(stop) = STOP.get() {
                stop.stop();
            }
            BOOL::from(true)
        }
        _ => BOOL::from(false),
    }
}
