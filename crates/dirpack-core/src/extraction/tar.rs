//! Sequential tar.gz extraction.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::ArchiveError;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::path::sanitize_entry_path;
use crate::formats::detect::decode_error;
use crate::formats::open_tar_gz;

/// Extracts a tar.gz archive file into `output_dir`.
///
/// See [`extract_from_reader`] for how entries are materialized.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, is not gzip data, has a
/// corrupt or unsafe entry, or if any filesystem write fails. Entries
/// extracted before the failure are left in place.
pub fn extract_tar_gz<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
) -> Result<ExtractionReport> {
    let file = File::open(archive_path.as_ref())?;
    extract_from_reader(BufReader::new(file), output_dir)
}

/// Extracts a tar.gz stream into `output_dir`, entry by entry.
///
/// Directories that do not exist yet are created with mode 0o755; anything
/// already present at a directory entry's location is left alone. Regular
/// files get their missing parents created, are opened for read-write with
/// the stored mode (applied on creation only) and truncated, then receive
/// exactly the entry's payload. Other entry kinds are skipped.
///
/// Nothing is written under `output_dir` if the stream has no gzip header.
///
/// # Errors
///
/// Returns the first error encountered; there is no rollback.
pub fn extract_from_reader<R: BufRead, P: AsRef<Path>>(
    reader: R,
    output_dir: P,
) -> Result<ExtractionReport> {
    let output_dir = output_dir.as_ref();
    let start = Instant::now();
    let mut archive = open_tar_gz(reader)?;
    let mut report = ExtractionReport::new();

    for entry in archive.entries().map_err(decode_error)? {
        let mut entry = entry.map_err(decode_error)?;
        let relative = sanitize_entry_path(&entry.path().map_err(decode_error)?)?;
        let target = output_dir.join(&relative);
        let entry_type = entry.header().entry_type();

        if entry_type.is_dir() {
            if fs::symlink_metadata(&target).is_ok() {
                log::debug!("keeping existing {}", target.display());
            } else {
                create_directory(&target)?;
                log::debug!("created directory {}", target.display());
                report.directories_created += 1;
            }
        } else if entry_type.is_file() && !relative.as_os_str().is_empty() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mode = entry.header().mode().map_err(decode_error)?;
            let mut file = open_target(&target, mode)?;
            let expected = entry.size();
            let written = copy_payload(&mut entry, &mut file)?;
            if written < expected {
                return Err(ArchiveError::InvalidArchive(format!(
                    "entry {} truncated after {written} of {expected} bytes",
                    relative.display()
                )));
            }
            log::debug!("wrote {} ({written} bytes)", target.display());
            report.bytes_written += written;
            report.files_extracted += 1;
        } else {
            log::debug!(
                "skipping {:?} entry {}",
                entry_type,
                String::from_utf8_lossy(&entry.path_bytes())
            );
            report.entries_skipped += 1;
        }
    }

    report.duration = start.elapsed();
    Ok(report)
}

/// Copies an entry payload to its target.
///
/// Failures reading the archive stream are reported as malformed archive
/// data, failures writing the target stay I/O errors.
fn copy_payload<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<u64> {
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(decode_error(e)),
        };
        writer.write_all(&buffer[..n])?;
        total += n as u64;
    }
    Ok(total)
}

const COPY_BUFFER_SIZE: usize = 64 * 1024;

#[cfg(unix)]
fn create_directory(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_directory(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn open_target(path: &Path, mode: u32) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode & 0o7777)
        .open(path)
}

#[cfg(not(unix))]
fn open_target(path: &Path, _mode: u32) -> io::Result<File> {
    fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
