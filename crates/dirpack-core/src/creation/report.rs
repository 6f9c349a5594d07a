//! Archive creation operation reporting.

use std::time::Duration;

/// Report of an archive creation operation.
///
/// # Examples
///
/// ```
/// use dirpack_core::creation::CreationReport;
///
/// let mut report = CreationReport::default();
/// report.files_added = 10;
/// report.bytes_read = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// assert_eq!(report.total_entries(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Number of regular files added to the archive.
    pub files_added: usize,

    /// Number of directory entries added to the archive.
    pub directories_added: usize,

    /// Number of paths excluded by the ignore rules (pruned subtrees count
    /// once).
    pub paths_ignored: usize,

    /// Number of special files (sockets, FIFOs, devices) left out.
    pub files_skipped: usize,

    /// Total payload bytes read from source files.
    pub bytes_read: u64,

    /// Size of the finished archive in bytes.
    pub bytes_compressed: u64,

    /// Duration of the creation operation.
    pub duration: Duration,

    /// Warnings generated during creation.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Creates a new empty creation report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of entries written to the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_added + self.directories_added
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes_compressed as f64
    }
}
