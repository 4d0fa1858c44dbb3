use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::schedule::SchedulePolicy;
use crate::models::config::CaptureConfig;
use crate::models::error::CaptureError;
use crate::models::state::{LoopState, RunStats, SkipReason, TickOutcome};
use crate::processing::filter::ProcessFilter;
use crate::processing::frame_buffers::{resolve_dimensions, FrameBuffers};
use crate::storage::image_writer;
use crate::storage::output_path::OutputPathResolver;
use crate::traits::active_process::ActiveProcessLookup;
use crate::traits::clock::{Clock, SystemClock};
use crate::traits::screen_capturer::ScreenCapturer;
use crate::traits::status_reporter::StatusReporter;

/// Cloneable handle that asks a running `CaptureLoop` to stop.
///
/// Safe to trigger from any thread, including a console control handler.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Fixed-interval timelapse loop.
///
/// Generic over the screen and focused-process backends, and over the clock
/// so tests can drive time by hand.
///
/// ```text
/// [Clock] → wait interval → [ActiveProcessLookup] → [ProcessFilter]
///        → [ScreenCapturer] → [FrameBuffers] → [OutputPathResolver] → image file
/// ```
pub struct CaptureLoop<S: ScreenCapturer, P: ActiveProcessLookup, C: Clock = SystemClock> {
    config: CaptureConfig,
    filter: ProcessFilter,
    resolver: OutputPathResolver,
    screen: S,
    processes: P,
    clock: C,
    policy: SchedulePolicy,
    buffers: Option<FrameBuffers>,
    stats: RunStats,
    state: LoopState,
    stop: StopHandle,
    reporter: Option<Arc<dyn StatusReporter>>,
}

impl<S: ScreenCapturer, P: ActiveProcessLookup> CaptureLoop<S, P, SystemClock> {
    /// Build a loop on the real clock. Fails if a filter pattern is malformed.
    pub fn new(config: CaptureConfig, screen: S, processes: P) -> Result<Self, CaptureError> {
        let filter = ProcessFilter::new(config.include.as_slice(), config.exclude.as_slice())?;
        let resolver = OutputPathResolver::new(config.output.clone());
        let policy = SchedulePolicy::new(config.interval);

        Ok(Self {
            config,
            filter,
            resolver,
            screen,
            processes,
            clock: SystemClock,
            policy,
            buffers: None,
            stats: RunStats::default(),
            state: LoopState::Idle,
            stop: StopHandle::new(),
            reporter: None,
        })
    }
}

impl<S: ScreenCapturer, P: ActiveProcessLookup, C: Clock> CaptureLoop<S, P, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> CaptureLoop<S, P, C2> {
        CaptureLoop {
            config: self.config,
            filter: self.filter,
            resolver: self.resolver,
            screen: self.screen,
            processes: self.processes,
            clock,
            policy: self.policy,
            buffers: self.buffers,
            stats: self.stats,
            state: self.state,
            stop: self.stop,
            reporter: self.reporter,
        }
    }

    pub fn with_policy(mut self, policy: SchedulePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start the output index search somewhere other than 0.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.stats.output_index = index;
        self
    }

    /// Share an existing stop handle, e.g. one already wired to a signal handler.
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    pub fn set_reporter(&mut self, reporter: Arc<dyn StatusReporter>) {
        self.reporter = Some(reporter);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn buffers_allocated(&self) -> bool {
        self.buffers.is_some()
    }

    /// Run until the stop handle fires. Returns the final counters.
    ///
    /// Intervals are measured from the start of one tick to the start of the
    /// next. When a tick takes longer than the interval the next one starts
    /// immediately.
    pub fn run(&mut self) -> RunStats {
        log::info!(
            "Capture loop started: every {:?} to {}",
            self.policy.interval,
            self.config.output
        );
        self.set_state(LoopState::Waiting);

        let mut interval_start = self.clock.now();
        while !self.stop.is_stopped() {
            let elapsed = self.clock.now().saturating_duration_since(interval_start);
            if let Some(remaining) = self.policy.remaining(elapsed) {
                self.clock.sleep(self.policy.sleep_for(remaining));
                continue;
            }
            interval_start = self.clock.now();

            self.set_state(LoopState::Capturing);
            if let TickOutcome::Failed(error) = self.tick() {
                if let Some(ref reporter) = self.reporter {
                    reporter.on_error(&error);
                }
            }

            let work = self.clock.now().saturating_duration_since(interval_start);
            if work >= self.policy.interval {
                self.stats.overruns += 1;
                log::debug!("Tick took {:?}, longer than the {:?} interval", work, self.policy.interval);
            }

            if let Some(ref reporter) = self.reporter {
                reporter.on_statistics(&self.stats);
            }
            self.set_state(LoopState::Waiting);
        }

        // Release the frame surfaces before handing control back.
        self.buffers = None;
        self.set_state(LoopState::Terminated);
        log::info!(
            "Capture loop stopped: {} captures, index {}",
            self.stats.capture_count,
            self.stats.output_index
        );
        self.stats.clone()
    }

    /// One decision-and-capture step, without any waiting.
    ///
    /// Skipped ticks leave the capture count, output index and frame buffers
    /// untouched. Failures are counted and returned, never propagated.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(process) = self.processes.current() else {
            self.stats.skipped += 1;
            log::debug!("No foreground process, skipping tick");
            return TickOutcome::Skipped(SkipReason::NoActiveProcess);
        };

        if !self.filter.should_capture(&process) {
            self.stats.skipped += 1;
            log::debug!("Foreground process '{}' filtered out", process);
            return TickOutcome::Skipped(SkipReason::Filtered(process));
        }

        match self.capture_frame() {
            Ok(path) => {
                self.stats.capture_count += 1;
                self.stats.last_capture_at = Some(Utc::now());
                log::debug!("Captured '{}' to {}", process, path.display());
                TickOutcome::Captured(path)
            }
            Err(e) => {
                self.stats.failed += 1;
                log::warn!("Capture failed: {}", e);
                TickOutcome::Failed(e)
            }
        }
    }

    fn capture_frame(&mut self) -> Result<PathBuf, CaptureError> {
        let bounds = self.screen.bounds()?;

        let buffers = match &mut self.buffers {
            Some(buffers) => buffers,
            empty => {
                let output = resolve_dimensions(self.config.width, self.config.height, bounds.size());
                empty.insert(FrameBuffers::new(bounds.size(), output)?)
            }
        };
        buffers.capture_and_resize(&mut self.screen, bounds)?;

        let (path, index) = self.resolver.next_path(self.stats.output_index)?;
        self.stats.output_index = index;

        image_writer::save(buffers.output(), &path)?;
        Ok(path)
    }

    fn set_state(&mut self, state: LoopState) {
        self.state = state;
        if let Some(ref reporter) = self.reporter {
            reporter.on_state_changed(state);
        }
    }
}
