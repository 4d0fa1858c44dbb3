use regex::Regex;

use crate::models::error::CaptureError;

/// Include/exclude filter over the focused process name.
///
/// Patterns are regular expressions matched anywhere in the name. An empty
/// include list admits every process; an empty exclude list rejects none.
#[derive(Debug, Clone)]
pub struct ProcessFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl ProcessFilter {
    /// Compile the pattern lists. Fails on the first malformed pattern.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, CaptureError> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn should_capture(&self, process_name: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|re| re.is_match(process_name));
        let excluded = !self.exclude.is_empty() && self.exclude.iter().any(|re| re.is_match(process_name));
        included && !excluded
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, CaptureError> {
    patterns
        .iter()
        .map(|p| {
            let pattern = p.as_ref();
            Regex::new(pattern).map_err(|e| CaptureError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
