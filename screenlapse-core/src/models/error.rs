use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or running a capture session.
///
/// Configuration errors are fatal and surface before the loop starts.
/// Everything raised inside a tick is contained by the loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("{} does not exist.", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Unable to read {}.", .0.display())]
    ConfigUnreadable(PathBuf),

    #[error("Unable to parse configuration: {0}")]
    ConfigParse(String),

    #[error("No output format specified.")]
    MissingOutput,

    #[error("Invalid output format specified: {0}")]
    InvalidOutputTemplate(String),

    #[error("No interval specified.")]
    MissingInterval,

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("screen capture is not supported on this platform")]
    PlatformUnavailable,

    #[error("platform call failed: {0}")]
    Platform(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("no free output path after {attempts} attempts starting at index {start_index}")]
    OutputPathExhausted { start_index: u64, attempts: u64 },
}

impl CaptureError {
    /// Whether this error must stop the program before capturing starts.
    ///
    /// Per-tick failures (platform, encode, storage, exhausted paths) are
    /// recoverable and only skip the current frame.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_)
                | Self::ConfigUnreadable(_)
                | Self::ConfigParse(_)
                | Self::MissingOutput
                | Self::InvalidOutputTemplate(_)
                | Self::MissingInterval
                | Self::InvalidPattern { .. }
                | Self::PlatformUnavailable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_fatal() {
        assert!(CaptureError::MissingOutput.is_fatal());
        assert!(CaptureError::MissingInterval.is_fatal());
        assert!(CaptureError::ConfigNotFound(PathBuf::from("x.json")).is_fatal());
    }

    #[test]
    fn tick_errors_are_recoverable() {
        assert!(!CaptureError::Encode("disk full".into()).is_fatal());
        assert!(!CaptureError::Platform("BitBlt failed".into()).is_fatal());
        assert!(!CaptureError::OutputPathExhausted { start_index: 0, attempts: 10 }.is_fatal());
    }

    #[test]
    fn messages_match_cli_wording() {
        assert_eq!(
            CaptureError::ConfigNotFound(PathBuf::from("lapse.json")).to_string(),
            "lapse.json does not exist."
        );
        assert_eq!(CaptureError::MissingInterval.to_string(), "No interval specified.");
    }
}
