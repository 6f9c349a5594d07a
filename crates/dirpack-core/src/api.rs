//! High-level public API for building and restoring archives.

use std::path::Path;

use crate::ExtractionReport;
use crate::Result;
use crate::creation::CreationConfig;
use crate::creation::CreationReport;

/// Packs the directory tree at `source` into a tar.gz file at `destination`.
///
/// Paths matching any pattern in `ignore` are skipped together with their
/// subtrees, and so is `destination` itself when it lives under `source`.
/// Patterns use shell glob syntax (`*`, `?`, `[...]`); a pattern containing
/// `/` is matched against the whole traversal path, one without `/` also
/// against the last component. Malformed patterns never match.
///
/// # Arguments
///
/// * `source` - Directory (or single file) to archive
/// * `destination` - Archive file to create or truncate
/// * `ignore` - Glob patterns to leave out
///
/// # Errors
///
/// Returns an error if:
/// - `source` does not exist
/// - `destination` cannot be created
/// - Any entry cannot be read or stored
///
/// A partially written `destination` is left on disk.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::create_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = create_archive("project", "project.tar.gz", &["*.log", "target"])?;
/// println!("Archived {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn create_archive<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<str>>(
    source: P,
    destination: Q,
    ignore: &[S],
) -> Result<CreationReport> {
    create_archive_with_config(source, destination, ignore, &CreationConfig::default())
}

/// Like [`create_archive`], with explicit compression and metadata settings.
///
/// # Errors
///
/// Same as [`create_archive`], plus an error if `config` is invalid.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::create_archive_with_config;
/// use dirpack_core::creation::CreationConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CreationConfig::default().with_preserve_permissions(false);
/// create_archive_with_config("site", "site.tgz", &[] as &[&str], &config)?;
/// # Ok(())
/// # }
/// ```
pub fn create_archive_with_config<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<str>>(
    source: P,
    destination: Q,
    ignore: &[S],
    config: &CreationConfig,
) -> Result<CreationReport> {
    crate::creation::tar::create_tar_gz(source, destination, ignore, config)
}

/// Extracts the tar.gz file at `archive` into `destination`.
///
/// Missing directories are created; existing files named by the archive are
/// overwritten. Entries other than files and directories are skipped.
///
/// # Arguments
///
/// * `archive` - Path to the archive file
/// * `destination` - Directory where entries will be restored
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be opened or is not gzip-compressed tar
/// - An entry name contains `..`
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("project.tar.gz", "/tmp/restore")?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    destination: Q,
) -> Result<ExtractionReport> {
    crate::extraction::extract_tar_gz(archive, destination)
}
