//! Error types for scanning and analysis operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while recording or traversing filesystem entries.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found (dangling symlink target, disappearing file).
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A report sink could not be opened or written.
    #[error("could not open logfile {path}: {source}")]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error occurred at.
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::NotADirectory { path }
            | Self::Sink { path, .. } => path,
        }
    }

    /// Short reason string without the path, for `Error: <path>: <reason>`
    /// stderr lines.
    pub fn reason(&self) -> String {
        match self {
            Self::PermissionDenied { .. } => "permission denied".to_string(),
            Self::NotFound { .. } => "no such file or directory".to_string(),
            Self::NotADirectory { .. } => "not a directory".to_string(),
            Self::Io { source, .. } | Self::Sink { source, .. } => source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io_classifies_kind() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::Other, "odd"),
        );
        assert!(matches!(err, ScanError::Io { .. }));
    }

    #[test]
    fn test_path_and_reason() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.path(), Path::new("/test/path"));
        assert_eq!(err.reason(), "permission denied");
    }
}
