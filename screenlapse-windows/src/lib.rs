//! # screenlapse-windows
//!
//! Windows backend for screenlapse.
//!
//! Provides:
//! - `GdiScreenCapturer` — primary display capture via GDI `BitBlt`
//! - `ForegroundProcess` — name of the process owning the foreground window
//! - `console` — Ctrl-C / Ctrl-Break handler that fires a `StopHandle`
//!
//! On other targets the crate is empty.
//!
//! ## Usage
//! ```ignore
//! use screenlapse_core::{CaptureConfig, CaptureLoop, StopHandle};
//! use screenlapse_windows::{console, ForegroundProcess, GdiScreenCapturer};
//!
//! let stop = StopHandle::new();
//! console::install_stop_handler(stop.clone())?;
//! let mut capture = CaptureLoop::new(config, GdiScreenCapturer::new(), ForegroundProcess::new())?
//!     .with_stop_handle(stop);
//! capture.run();
//! ```

#[cfg(target_os = "windows")]
pub mod console;
#[cfg(target_os = "windows")]
pub mod foreground;
#[cfg(target_os = "windows")]
pub mod gdi_capture;

#[cfg(target_os = "windows")]
pub use foreground::ForegroundProcess;
#[cfg(target_os = "windows")]
pub use gdi_capture::GdiScreenCapturer;
