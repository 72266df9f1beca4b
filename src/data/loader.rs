use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

/// Why the log could not be read. Both cases are recovered as an empty log
/// by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Missing,
    Unreadable(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Missing => write!(f, "log file not found"),
            LoadError::Unreadable(e) => write!(f, "cannot read log file: {e}"),
        }
    }
}

/// Read the whole telemetry log as text.
///
/// Bytes that are not valid UTF-8 are decoded as Latin-1, so a single
/// corrupted record never hides the rest of the file.
pub fn load_log(path: &Path) -> Result<String, LoadError> {
    let content = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::Missing,
        _ => LoadError::Unreadable(e.to_string()),
    })?;

    Ok(String::from_utf8(content)
        .unwrap_or_else(|e| e.into_bytes().into_iter().map(char::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_log(&dir.path().join("nope.log")).unwrap_err();
        assert_eq!(err, LoadError::Missing);
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_log(dir.path()), Err(LoadError::Unreadable(_))));
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.log");
        std::fs::write(&path, b"State: Arr\xeat\n").unwrap();
        assert_eq!(load_log(&path).unwrap(), "State: Arr\u{ea}t\n");
    }
}
