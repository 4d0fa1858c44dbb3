use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::error::CaptureError;
use super::template::OutputTemplate;

/// On-disk configuration document, before validation.
///
/// Keys are lowercase; the PascalCase spellings written by older tools are
/// accepted as aliases.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default, alias = "Output")]
    output: Option<String>,
    #[serde(default, alias = "Include")]
    include: Option<Vec<String>>,
    #[serde(default, alias = "Exclude")]
    exclude: Option<Vec<String>>,
    #[serde(default, alias = "Width")]
    width: Option<u32>,
    #[serde(default, alias = "Height")]
    height: Option<u32>,
    /// Milliseconds between captures.
    #[serde(default, alias = "Interval")]
    interval: Option<u64>,
}

/// Validated configuration for a capture session.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Numbered path each frame is written to.
    pub output: OutputTemplate,

    /// Regex patterns; when non-empty the focused process must match one.
    pub include: Vec<String>,

    /// Regex patterns; a focused process matching any of them is skipped.
    pub exclude: Vec<String>,

    /// Output width in pixels, 0 = derive from height or the screen.
    pub width: u32,

    /// Output height in pixels, 0 = derive from width or the screen.
    pub height: u32,

    /// Time between the start of consecutive ticks. Always non-zero.
    pub interval: Duration,
}

impl CaptureConfig {
    pub fn new(output: &str, interval: Duration) -> Result<Self, CaptureError> {
        if interval.is_zero() {
            return Err(CaptureError::MissingInterval);
        }
        Ok(Self {
            output: OutputTemplate::parse(output)?,
            include: Vec::new(),
            exclude: Vec::new(),
            width: 0,
            height: 0,
            interval,
        })
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, CaptureError> {
        if !path.exists() {
            return Err(CaptureError::ConfigNotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path).map_err(|e| {
            log::debug!("reading {} failed: {}", path.display(), e);
            CaptureError::ConfigUnreadable(path.to_path_buf())
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        let file: ConfigFile = serde_json::from_str(json).map_err(|e| CaptureError::ConfigParse(e.to_string()))?;

        let output = file.output.unwrap_or_default();
        let output = OutputTemplate::parse(&output)?;

        let interval = match file.interval {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => return Err(CaptureError::MissingInterval),
        };

        Ok(Self {
            output,
            include: file.include.unwrap_or_default(),
            exclude: file.exclude.unwrap_or_default(),
            width: file.width.unwrap_or(0),
            height: file.height.unwrap_or(0),
            interval,
        })
    }

    pub fn with_include(mut self, patterns: &[&str]) -> Self {
        self.include = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_exclude(mut self, patterns: &[&str]) -> Self {
        self.exclude = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
