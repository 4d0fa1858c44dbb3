pub mod active_process;
pub mod clock;
pub mod screen_capturer;
pub mod status_reporter;
