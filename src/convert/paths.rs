//! Output folder naming.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name used when sanitizing leaves nothing.
pub const DEFAULT_FILENAME: &str = "default_filename";

/// Turn a display name into a folder name.
///
/// Spaces, hyphens and dots become `_`, existing underscores are dropped,
/// and characters that cannot appear in a path component become `_`.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|&c| c != '_')
        .map(|c| match c {
            ' ' | '-' | '.' => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Create the first free directory among `base`, `base_1`, `base_2`, ...
/// under `parent` and return its path.
pub fn allocate_dir(parent: &Path, base: &str) -> io::Result<PathBuf> {
    let mut suffix = 0usize;
    loop {
        let name = if suffix == 0 {
            base.to_string()
        } else {
            format!("{}_{}", base, suffix)
        };
        let candidate = parent.join(&name);
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("1.2 Units - Intro"), "1_2_Units___Intro");
        assert_eq!(sanitize_filename("snake_case"), "snakecase");
        assert_eq!(sanitize_filename("a/b: c?"), "a_b__c_");
        assert_eq!(sanitize_filename("___"), DEFAULT_FILENAME);
        assert_eq!(sanitize_filename(""), DEFAULT_FILENAME);
    }

    #[test]
    fn test_allocate_dir_does_not_clobber() {
        let dir = TempDir::new().unwrap();
        let first = allocate_dir(dir.path(), "q").unwrap();
        let second = allocate_dir(dir.path(), "q").unwrap();
        let third = allocate_dir(dir.path(), "q").unwrap();

        assert_eq!(first.file_name().unwrap(), "q");
        assert_eq!(second.file_name().unwrap(), "q_1");
        assert_eq!(third.file_name().unwrap(), "q_2");
        assert!(third.is_dir());
    }
}
