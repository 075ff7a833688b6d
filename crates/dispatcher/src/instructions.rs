//! Instruction file validation and loading

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::error::DispatcherError;

/// Age of a file modified at `modified`, seen at `now`
///
/// A modification time in the future counts as age zero.
pub fn file_age(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}

/// Reject instructions older than `max_age`
pub fn check_freshness(
    path: &Path,
    modified: SystemTime,
    now: SystemTime,
    max_age: Duration,
) -> Result<Duration, DispatcherError> {
    let age = file_age(modified, now);
    if age > max_age {
        return Err(DispatcherError::stale(path, age, max_age));
    }
    Ok(age)
}

/// Check the instruction file exists and is fresh
///
/// Returns the file age on success.
pub fn validate_instructions(path: &Path, max_age: Duration) -> Result<Duration, DispatcherError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(DispatcherError::missing(path)),
        Err(e) => return Err(DispatcherError::unreadable(path, e)),
    };

    if !metadata.is_file() {
        return Err(DispatcherError::unreadable(
            path,
            std::io::Error::other("not a regular file"),
        ));
    }

    let modified = metadata
        .modified()
        .map_err(|e| DispatcherError::unreadable(path, e))?;
    let age = check_freshness(path, modified, SystemTime::now(), max_age)?;

    debug!(path = %path.display(), age_secs = age.as_secs(), "Instructions file is fresh");
    Ok(age)
}

/// Read the instruction file and trim surrounding whitespace
pub fn load_instructions(path: &Path) -> Result<String, DispatcherError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DispatcherError::missing(path),
        _ => DispatcherError::unreadable(path, e),
    })?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DispatcherError::empty(path));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    const TEN_MINUTES: Duration = Duration::from_secs(600);

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_file_age_future_is_zero() {
        let now = SystemTime::now();
        let future = now + Duration::from_secs(30);
        assert_eq!(file_age(future, now), Duration::ZERO);
    }

    #[test]
    fn test_check_freshness_boundary() {
        let path = Path::new("instructions.txt");
        let now = SystemTime::now();

        let at_limit = now - TEN_MINUTES;
        assert_eq!(
            check_freshness(path, at_limit, now, TEN_MINUTES).unwrap(),
            TEN_MINUTES
        );

        let past_limit = now - Duration::from_secs(601);
        let err = check_freshness(path, past_limit, now, TEN_MINUTES).unwrap_err();
        assert!(matches!(err, DispatcherError::InstructionsStale { .. }));
    }

    #[test]
    fn test_validate_missing() {
        let dir = TempDir::new().unwrap();
        let err = validate_instructions(&dir.path().join("nope.txt"), TEN_MINUTES).unwrap_err();
        assert!(matches!(err, DispatcherError::InstructionsMissing { .. }));
    }

    #[test]
    fn test_validate_fresh() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "i.txt", "focus on tests");
        let age = validate_instructions(&path, TEN_MINUTES).unwrap();
        assert!(age < TEN_MINUTES);
    }

    #[test]
    fn test_validate_stale() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "i.txt", "focus on tests");
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(700))
            .unwrap();

        let err = validate_instructions(&path, TEN_MINUTES).unwrap_err();
        assert!(matches!(err, DispatcherError::InstructionsStale { .. }));
        // stale files are left for inspection
        assert!(path.exists());
    }

    #[test]
    fn test_validate_directory() {
        let dir = TempDir::new().unwrap();
        let err = validate_instructions(dir.path(), TEN_MINUTES).unwrap_err();
        assert!(matches!(err, DispatcherError::InstructionsUnreadable { .. }));
    }

    #[test]
    fn test_load_trims() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "i.txt", "\n  keep the auth notes \n\n");
        assert_eq!(load_instructions(&path).unwrap(), "keep the auth notes");
    }

    #[test]
    fn test_load_whitespace_only() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "i.txt", " \n\t \r\n");
        let err = load_instructions(&path).unwrap_err();
        assert!(matches!(err, DispatcherError::InstructionsEmpty { .. }));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("i.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        let err = load_instructions(&path).unwrap_err();
        assert!(matches!(err, DispatcherError::InstructionsUnreadable { .. }));
    }
}
