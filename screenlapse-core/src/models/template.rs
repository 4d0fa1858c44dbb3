use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::CaptureError;

/// A numbered output path such as `shots/frame-{0000}.png`.
///
/// The placeholder is either `{}` or a run of zeros inside braces. The
/// number of zeros is the minimum width the index is zero-padded to, so
/// `{0000}` renders index 7 as `0007` and index 12345 as `12345`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    prefix: String,
    suffix: String,
    min_digits: usize,
}

impl OutputTemplate {
    pub fn parse(template: &str) -> Result<Self, CaptureError> {
        if template.is_empty() {
            return Err(CaptureError::MissingOutput);
        }

        let invalid = |reason: &str| CaptureError::InvalidOutputTemplate(format!("{template}: {reason}"));

        if template.matches('{').count() != 1 {
            return Err(invalid("expected exactly one {} placeholder"));
        }
        let open = template.find('{').ok_or_else(|| invalid("missing '{'"))?;
        let close = template[open..]
            .find('}')
            .map(|offset| open + offset)
            .ok_or_else(|| invalid("unclosed placeholder"))?;

        let spec = &template[open + 1..close];
        if !spec.chars().all(|c| c == '0') {
            return Err(invalid("placeholder may only contain zeros"));
        }

        Ok(Self {
            prefix: template[..open].to_string(),
            suffix: template[close + 1..].to_string(),
            min_digits: spec.len(),
        })
    }

    /// Render the path for `index`.
    pub fn render(&self, index: u64) -> PathBuf {
        PathBuf::from(format!(
            "{}{:0width$}{}",
            self.prefix,
            index,
            self.suffix,
            width = self.min_digits
        ))
    }
}

impl FromStr for OutputTemplate {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OutputTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}{}", self.prefix, "0".repeat(self.min_digits), self.suffix)
    }
}
