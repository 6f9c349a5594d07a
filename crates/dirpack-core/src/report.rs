//! Extraction operation reporting.

use std::time::Duration;

/// Report of an archive extraction operation.
///
/// Contains statistics about the extraction process.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directories created.
    pub directories_created: usize,

    /// Number of entries that were neither files nor directories, or that
    /// named the destination itself.
    pub entries_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries materialized on disk.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_report_default() {
        let report = ExtractionReport::new();
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.bytes_written, 0);
        assert_eq!(report.total_items(), 0);
    }

    #[test]
    fn test_total_items() {
        let report = ExtractionReport {
            files_extracted: 3,
            directories_created: 2,
            entries_skipped: 4,
            ..ExtractionReport::default()
        };
        assert_eq!(report.total_items(), 5);
    }
}
