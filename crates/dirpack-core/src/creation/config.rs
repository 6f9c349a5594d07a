//! Configuration for archive creation operations.

use crate::ArchiveError;
use crate::Result;

/// Configuration for archive creation operations.
///
/// Controls compression and how much filesystem metadata is recorded in
/// entry headers. Ignore patterns are not part of the configuration; they
/// are passed per call.
///
/// # Examples
///
/// ```
/// use dirpack_core::creation::CreationConfig;
///
/// let config = CreationConfig::default();
/// assert_eq!(config.compression_level, Some(6));
///
/// let custom = CreationConfig::default()
///     .with_compression_level(9)
///     .with_preserve_permissions(false);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationConfig {
    /// Compression level (1-9).
    ///
    /// Higher values provide better compression but slower speed.
    /// `None` uses the gzip default.
    ///
    /// Default: `Some(6)` (balanced).
    pub compression_level: Option<u8>,

    /// Record mode, owner and modification time from the filesystem.
    ///
    /// When disabled, files are stored as 0o644, directories as 0o755, and
    /// ownership and mtime are zeroed, which makes archives reproducible.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for CreationConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(6),
            preserve_permissions: true,
        }
    }
}

impl CreationConfig {
    /// Creates a new `CreationConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set but not in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArchiveError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
