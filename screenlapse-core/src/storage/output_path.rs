use std::fs;
use std::path::PathBuf;

use crate::models::error::CaptureError;
use crate::models::template::OutputTemplate;

/// Upper bound on candidates tried by a single `next_path` call.
pub const MAX_PATH_ATTEMPTS: u64 = 1_000_000;

/// Turns an output template and a running index into free file paths.
///
/// The index is a low-water mark: callers feed the returned index back in,
/// so every call starts at the last path handed out and skips forward past
/// files that already exist.
#[derive(Debug, Clone)]
pub struct OutputPathResolver {
    template: OutputTemplate,
    max_attempts: u64,
}

impl OutputPathResolver {
    pub fn new(template: OutputTemplate) -> Self {
        Self {
            template,
            max_attempts: MAX_PATH_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// First path at or after `start_index` with no existing file.
    ///
    /// Creates the candidate's parent directory if it is missing. Returns the
    /// path and its index.
    pub fn next_path(&self, start_index: u64) -> Result<(PathBuf, u64), CaptureError> {
        let mut index = start_index;
        for _ in 0..self.max_attempts {
            let path = self.template.render(index);

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !parent.is_dir() {
                    fs::create_dir_all(parent).map_err(|e| {
                        CaptureError::Storage(format!("failed to create {}: {}", parent.display(), e))
                    })?;
                }
            }

            if !path.exists() {
                return Ok((path, index));
            }
            index = index.checked_add(1).ok_or(CaptureError::OutputPathExhausted {
                start_index,
                attempts: index - start_index + 1,
            })?;
        }

        Err(CaptureError::OutputPathExhausted {
            start_index,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn resolver(dir: &std::path::Path, pattern: &str) -> OutputPathResolver {
        let template = format!("{}/{}", dir.display(), pattern);
        OutputPathResolver::new(OutputTemplate::parse(&template).unwrap())
    }

    #[test]
    fn empty_directory_starts_at_index() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver(dir.path(), "shot-{}.png");

        let (path, index) = r.next_path(0).unwrap();
        assert_eq!(path, dir.path().join("shot-0.png"));
        assert_eq!(index, 0);
    }

    #[test]
    fn skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shot-0.png"), b"x").unwrap();
        fs::write(dir.path().join("shot-1.png"), b"x").unwrap();
        let r = resolver(dir.path(), "shot-{}.png");

        let (path, index) = r.next_path(0).unwrap();
        assert_eq!(path, dir.path().join("shot-2.png"));
        assert_eq!(index, 2);
    }

    #[test]
    fn same_index_until_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver(dir.path(), "shot-{}.png");

        let (first, i) = r.next_path(0).unwrap();
        let (again, j) = r.next_path(i).unwrap();
        assert_eq!(first, again);
        assert_eq!(i, j);
    }

    #[test]
    fn paths_are_distinct_and_fresh() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f-3.png"), b"x").unwrap();
        let r = resolver(dir.path(), "f-{}.png");

        let mut seen = HashSet::new();
        let mut index = 0;
        for _ in 0..10 {
            let (path, next) = r.next_path(index).unwrap();
            assert!(!path.exists());
            assert!(seen.insert(path.clone()));
            fs::write(&path, b"frame").unwrap();
            index = next;
        }
        assert!(!seen.contains(&dir.path().join("f-3.png")));
        assert_eq!(index, 10);
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver(dir.path(), "a/b/{000}.jpg");

        let (path, _) = r.next_path(5).unwrap();
        assert_eq!(path, dir.path().join("a/b/005.jpg"));
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        let r = OutputPathResolver::new(OutputTemplate::parse("screenlapse-test-{}-never-exists.png").unwrap());
        let (path, index) = r.next_path(0).unwrap();
        assert_eq!(path, PathBuf::from("screenlapse-test-0-never-exists.png"));
        assert_eq!(index, 0);
    }

    #[test]
    fn gives_up_after_cap() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..3 {
            fs::write(dir.path().join(format!("s{i}.png")), b"x").unwrap();
        }
        let r = resolver(dir.path(), "s{}.png").with_max_attempts(3);

        assert_eq!(
            r.next_path(0),
            Err(CaptureError::OutputPathExhausted {
                start_index: 0,
                attempts: 3
            })
        );
        assert_eq!(r.next_path(1).unwrap().1, 3);
    }
}
