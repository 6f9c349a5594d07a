//! Appending a single file to an archive handle.

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use tar::Builder;

use crate::ArchiveError;
use crate::Result;
use crate::creation::CreationConfig;
use crate::creation::compression::compression_level_to_flate2;
use crate::creation::tar::append_file_entry;

/// Writes `source` into `target` as one tar.gz entry named `entry_name`.
///
/// Uses [`CreationConfig::default`]. See [`append_file_with_config`].
///
/// # Errors
///
/// Returns an error if `source` cannot be read or is not a regular file, if
/// `entry_name` cannot be stored, or if writing to `target` fails.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::append_file;
/// use dirpack_core::contains_entry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut buffer = Vec::new();
/// append_file(&mut buffer, "file.txt", "entries/file.txt")?;
/// assert!(contains_entry(&buffer, "entries/file.txt"));
/// # Ok(())
/// # }
/// ```
pub fn append_file<W: Write, P: AsRef<Path>>(
    target: W,
    source: P,
    entry_name: &str,
) -> Result<()> {
    append_file_with_config(target, source, entry_name, &CreationConfig::default())
}

/// Writes `source` into `target` as one tar.gz entry named `entry_name`.
///
/// Each call emits a complete, self-contained gzip member (header, one tar
/// entry, end-of-archive marker, gzip trailer). Bytes already in `target`
/// are neither read nor rewritten. Readers decode consecutive gzip members
/// as one stream but stop at the first end-of-archive marker, so only the
/// first member's entries are visible when calls are stacked onto the same
/// buffer.
///
/// The entry's metadata comes from `source`, except its name.
///
/// # Errors
///
/// Same as [`append_file`], plus
/// [`ArchiveError::InvalidCompressionLevel`] for an invalid `config`.
pub fn append_file_with_config<W: Write, P: AsRef<Path>>(
    target: W,
    source: P,
    entry_name: &str,
    config: &CreationConfig,
) -> Result<()> {
    config.validate()?;

    let source = source.as_ref();
    let metadata = fs::metadata(source)?;
    if !metadata.is_file() {
        return Err(ArchiveError::NotARegularFile {
            path: source.to_path_buf(),
        });
    }
    let file = File::open(source)?;

    let encoder = GzEncoder::new(target, compression_level_to_flate2(config.compression_level));
    let mut builder = Builder::new(encoder);
    append_file_entry(&mut builder, entry_name, &metadata, file, config)?;
    builder.into_inner()?.finish()?;

    Ok(())
}
