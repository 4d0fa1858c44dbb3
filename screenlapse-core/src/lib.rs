//! # screenlapse-core
//!
//! Platform-agnostic timelapse capture core.
//!
//! Provides configuration, active-process filtering, reusable frame buffers,
//! numbered output paths, and the fixed-interval capture loop. Platform
//! backends (Windows GDI) implement the `ScreenCapturer` and
//! `ActiveProcessLookup` traits and plug into the generic `CaptureLoop`.
//!
//! ## Architecture
//!
//! ```text
//! screenlapse-core (this crate)
//! ├── traits/       ← ScreenCapturer, ActiveProcessLookup, StatusReporter, Clock
//! ├── models/       ← CaptureError, CaptureConfig, OutputTemplate, LoopState, RunStats
//! ├── processing/   ← ProcessFilter, FrameBuffers
//! ├── session/      ← CaptureLoop, SchedulePolicy
//! └── storage/      ← OutputPathResolver, image writer
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::CaptureConfig;
pub use models::error::CaptureError;
pub use models::frame::{Dimensions, Rect};
pub use models::state::{LoopState, RunStats, SkipReason, TickOutcome};
pub use models::template::OutputTemplate;
pub use processing::filter::ProcessFilter;
pub use processing::frame_buffers::{resolve_dimensions, FrameBuffers, MAX_FRAME_SIDE};
pub use session::capture_loop::{CaptureLoop, StopHandle};
pub use session::schedule::SchedulePolicy;
pub use storage::image_writer::ImageFormat;
pub use storage::output_path::OutputPathResolver;
pub use traits::active_process::ActiveProcessLookup;
pub use traits::clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use traits::clock::ManualClock;
pub use traits::screen_capturer::ScreenCapturer;
pub use traits::status_reporter::StatusReporter;
