//! ScreenLapse CLI: records a timelapse of the primary display while
//! selected applications have focus.

mod platform;
mod status;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use screenlapse_core::{CaptureConfig, CaptureError, StopHandle};

use status::ConsoleStatus;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config_path) = args.first() else {
        print_banner();
        return ExitCode::SUCCESS;
    };
    if args.len() > 1 {
        log::warn!("Ignoring extra arguments: {:?}", &args[1..]);
    }

    match run(Path::new(config_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_fatal() => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Capture stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_banner() {
    println!("ScreenLapse {}", env!("CARGO_PKG_VERSION"));
    println!("Copyright (c) ScreenLapse contributors");
    println!();
    println!("screenlapse <config path>");
}

fn run(config_path: &Path) -> Result<(), CaptureError> {
    let config = CaptureConfig::load(config_path)?;
    log::info!(
        "Loaded {}: output {}, interval {:?}, include {:?}, exclude {:?}",
        config_path.display(),
        config.output,
        config.interval,
        config.include,
        config.exclude
    );

    let stop = StopHandle::new();
    let stats = platform::run_capture(config, stop, Arc::new(ConsoleStatus::new()))?;

    println!();
    println!("Stopped after {} captures (index {}).", stats.capture_count, stats.output_index);
    Ok(())
}
