//! End-to-end capture runs against a fake screen and focused process.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use image::{Rgba, RgbaImage};
use screenlapse_core::{ActiveProcessLookup, CaptureConfig, CaptureError, CaptureLoop, Rect, ScreenCapturer, StopHandle};

const SCREEN_W: u32 = 64;
const SCREEN_H: u32 = 36;

struct MockScreen;

impl ScreenCapturer for MockScreen {
    fn bounds(&mut self) -> Result<Rect, CaptureError> {
        Ok(Rect::new(0, 0, SCREEN_W, SCREEN_H))
    }

    fn grab(&mut self, _area: Rect, target: &mut RgbaImage) -> Result<(), CaptureError> {
        for (x, _, px) in target.enumerate_pixels_mut() {
            *px = Rgba([(x * 4) as u8, 128, 255, 255]);
        }
        Ok(())
    }
}

/// Always reports `notepad`; requests a stop after `ticks` lookups.
struct Notepad {
    ticks: u32,
    stop: StopHandle,
}

impl ActiveProcessLookup for Notepad {
    fn current(&mut self) -> Option<String> {
        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            self.stop.stop();
        }
        Some("notepad".to_string())
    }
}

fn config(dir: &Path, extra: &str) -> CaptureConfig {
    let output = dir.join("shot-{0}.png");
    let json = format!(
        r#"{{ "output": {}, "interval": 50, "width": 0, "height": 0 {} }}"#,
        serde_json::to_string(&output.to_string_lossy()).unwrap(),
        extra
    );
    CaptureConfig::from_json(&json).unwrap()
}

fn run_ticks(config: CaptureConfig, ticks: u32) -> (screenlapse_core::RunStats, Duration) {
    let stop = StopHandle::new();
    let mut capture = CaptureLoop::new(
        config,
        MockScreen,
        Notepad {
            ticks,
            stop: stop.clone(),
        },
    )
    .unwrap()
    .with_stop_handle(stop);

    let started = Instant::now();
    let stats = capture.run();
    (stats, started.elapsed())
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn three_ticks_write_three_numbered_frames() {
    let dir = tempfile::tempdir().unwrap();

    let (stats, elapsed) = run_ticks(config(dir.path(), ""), 3);

    assert_eq!(stats.capture_count, 3);
    assert_eq!(stats.output_index, 2);
    assert!(elapsed >= Duration::from_millis(100), "ran too fast: {elapsed:?}");
    assert_eq!(file_names(dir.path()), vec!["shot-0.png", "shot-1.png", "shot-2.png"]);
    for name in ["shot-0.png", "shot-1.png", "shot-2.png"] {
        let frame = image::open(dir.path().join(name)).unwrap();
        assert_eq!((frame.width(), frame.height()), (SCREEN_W, SCREEN_H));
    }
}

#[test]
fn excluded_process_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let (stats, _) = run_ticks(config(dir.path(), r#", "exclude": ["notepad"]"#), 4);

    assert_eq!(stats.capture_count, 0);
    assert_eq!(stats.skipped, 4);
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn include_list_admits_matching_process() {
    let dir = tempfile::tempdir().unwrap();

    let (stats, _) = run_ticks(config(dir.path(), r#", "include": ["^note"]"#), 2);

    assert_eq!(stats.capture_count, 2);
    assert_eq!(file_names(dir.path()), vec!["shot-0.png", "shot-1.png"]);
}

#[test]
fn existing_frame_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("shot-0.png"), b"earlier run").unwrap();

    let mut capture = CaptureLoop::new(
        config(dir.path(), ""),
        MockScreen,
        Notepad {
            ticks: u32::MAX,
            stop: StopHandle::new(),
        },
    )
    .unwrap();
    let first = capture.tick();

    assert_eq!(
        first,
        screenlapse_core::TickOutcome::Captured(dir.path().join("shot-1.png"))
    );
    assert_eq!(fs::read(dir.path().join("shot-0.png")).unwrap(), b"earlier run");
    assert_eq!(capture.stats().output_index, 1);
}

#[test]
fn resized_output_keeps_aspect() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "").with_size(32, 0);

    let (stats, _) = run_ticks(config, 1);

    assert_eq!(stats.capture_count, 1);
    let frame = image::open(dir.path().join("shot-0.png")).unwrap();
    assert_eq!((frame.width(), frame.height()), (32, 18));
}
