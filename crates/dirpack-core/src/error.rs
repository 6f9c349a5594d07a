//! Error types for archive operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building, extracting, or appending to an
/// archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted or not a gzip-compressed tar stream.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Source path does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Path was expected to be a regular file.
    #[error("not a regular file: {path}")]
    NotARegularFile {
        /// The offending path.
        path: PathBuf,
    },

    /// Path cannot be stored as an archive entry name.
    #[error("path cannot be stored in an archive: {path}")]
    InvalidEntryName {
        /// The path that could not be converted.
        path: PathBuf,
    },

    /// Archive entry would be written outside the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The entry name as stored in the archive.
        path: PathBuf,
    },

    /// Compression level outside the supported range.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl ArchiveError {
    /// Returns `true` if this error was caused by malformed archive input
    /// rather than by the filesystem or the caller's arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::ArchiveError;
    ///
    /// let err = ArchiveError::InvalidArchive("missing gzip header".to_string());
    /// assert!(err.is_malformed_archive());
    ///
    /// let err = ArchiveError::InvalidCompressionLevel { level: 0 };
    /// assert!(!err.is_malformed_archive());
    /// ```
    #[must_use]
    pub const fn is_malformed_archive(&self) -> bool {
        matches!(
            self,
            Self::InvalidArchive(_) | Self::PathTraversal { .. }
        )
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::NotARegularFile { path }
            | Self::InvalidEntryName { path }
            | Self::PathTraversal { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchiveError::InvalidArchive("bad header".to_string());
        assert_eq!(err.to_string(), "invalid archive: bad header");
    }

    #[test]
    fn test_path_traversal_error() {
        let err = ArchiveError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
        assert!(err.is_malformed_archive());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ArchiveError = io_err.into();
        assert!(matches!(err, ArchiveError::Io(_)));
        assert!(!err.is_malformed_archive());
        assert!(err.path().is_none());
    }

    #[test]
    fn test_path_accessor() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("missing/dir"),
        };
        assert_eq!(err.path(), Some(Path::new("missing/dir")));

        let err = ArchiveError::NotARegularFile {
            path: PathBuf::from("some/dir"),
        };
        assert_eq!(err.path(), Some(Path::new("some/dir")));
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_invalid_compression_level_display() {
        let err = ArchiveError::InvalidCompressionLevel { level: 12 };
        let display = err.to_string();
        assert!(display.contains("12"));
        assert!(display.contains("1-9"));
    }
}
