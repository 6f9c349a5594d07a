//! Archive listing and entry lookup on in-memory buffers.

use crate::Result;
use crate::formats::detect::decode_error;
use crate::formats::open_tar_gz;
use crate::inspection::manifest::ArchiveEntry;
use crate::inspection::manifest::EntryKind;

/// Lists the entries of an in-memory tar.gz archive, in stored order.
///
/// No files are written to disk.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidArchive`](crate::ArchiveError::InvalidArchive)
/// if the buffer is not gzip data or an entry header cannot be decoded.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::list_entries;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = std::fs::read("backup.tar.gz")?;
/// for entry in list_entries(&data)? {
///     println!("{:?} {} ({} bytes)", entry.kind, entry.name, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_entries(archive: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut archive = open_tar_gz(archive)?;
    let mut listed = Vec::new();

    for entry in archive.entries().map_err(decode_error)? {
        let entry = entry.map_err(decode_error)?;
        let header = entry.header();

        listed.push(ArchiveEntry {
            name: String::from_utf8_lossy(&entry.path_bytes()).into_owned(),
            kind: EntryKind::from(header.entry_type()),
            mode: header.mode().map_err(decode_error)?,
            size: entry.size(),
            mtime: header.mtime().map_err(decode_error)?,
        });
    }

    Ok(listed)
}

/// Reports whether an in-memory tar.gz archive has an entry named `name`.
///
/// Names are compared byte for byte, with no normalization or globbing.
/// Malformed input never errors: a buffer that is not gzip data, or a read
/// failure part way through, yields `false` unless a match was already seen.
///
/// # Examples
///
/// ```
/// use dirpack_core::contains_entry;
///
/// assert!(!contains_entry(b"definitely not gzip", "x"));
/// ```
#[must_use]
pub fn contains_entry(archive: &[u8], name: &str) -> bool {
    let Ok(mut archive) = open_tar_gz(archive) else {
        return false;
    };
    let Ok(entries) = archive.entries() else {
        return false;
    };

    for entry in entries {
        match entry {
            Ok(entry) if entry.path_bytes().as_ref() == name.as_bytes() => return true,
            Ok(_) => {}
            Err(e) => {
                log::debug!("stopping entry scan: {e}");
                return false;
            }
        }
    }
    false
}
