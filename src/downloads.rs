//! Finding the most recent download.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// `~/Downloads`
pub fn downloads_dir() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
    PathBuf::from(home).join("Downloads")
}

/// Most recently created regular file directly inside `dir`.
///
/// Falls back to modification time on filesystems without creation times.
pub fn latest_file(dir: &Path) -> io::Result<PathBuf> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let created = metadata.created().or_else(|_| metadata.modified())?;
        if latest.as_ref().is_none_or(|(newest, _)| created > *newest) {
            latest = Some((created, entry.path()));
        }
    }

    latest.map(|(_, path)| path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("No files in {}", dir.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_latest_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("old.dmg"), "old").unwrap();
        std::thread::sleep(Duration::from_millis(50));
        fs::write(temp.path().join("new.zip"), "new").unwrap();
        fs::create_dir(temp.path().join("a-directory")).unwrap();

        assert_eq!(latest_file(temp.path()).unwrap(), temp.path().join("new.zip"));
    }

    #[test]
    fn test_latest_file_empty_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("only-a-directory")).unwrap();

        let err = latest_file(temp.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_latest_file_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(latest_file(&temp.path().join("nope")).is_err());
    }
}
