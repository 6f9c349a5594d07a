//! Gzip-compressed TAR creation from a directory tree.

use crate::ArchiveError;
use crate::Result;
use crate::creation::compression::compression_level_to_flate2;
use crate::creation::config::CreationConfig;
use crate::creation::filters::IgnoreSet;
use crate::creation::report::CreationReport;
use crate::creation::walker::FileId;
use crate::creation::walker::FilteredWalker;
use crate::creation::walker::WalkEntry;
use crate::creation::walker::WalkKind;
use crate::io::CountingWriter;
use flate2::write::GzEncoder;
use std::fs::File;
use std::fs::Metadata;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tar::Builder;
use tar::Header;

/// Creates a gzip-compressed TAR archive (.tar.gz) from `source`.
///
/// Every path under `source` is visited in pre-order. Paths matching
/// `ignore_patterns`, and the output archive itself, are left out; an
/// ignored directory is not descended into. Entries are stored under their
/// traversal path (`source/child/...`), see
/// [`entry_name`](crate::creation::filters::entry_name).
///
/// The output is created (or truncated) before the walk starts and is not
/// removed if a later step fails.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::creation::CreationConfig;
/// use dirpack_core::creation::tar::create_tar_gz;
///
/// let config = CreationConfig::default().with_compression_level(9);
/// let report = create_tar_gz("project", "project.tar.gz", &["target", "*.log"], &config)?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - `source` does not exist
/// - The output file cannot be created
/// - Any file or directory cannot be read
/// - A traversal path cannot be stored as an entry name
pub fn create_tar_gz<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<str>>(
    source: P,
    output: Q,
    ignore_patterns: &[S],
    config: &CreationConfig,
) -> Result<CreationReport> {
    config.validate()?;

    let source = source.as_ref();
    let output = output.as_ref();
    let ignore = IgnoreSet::new(ignore_patterns).with_literal(output);

    if !ignore.matches(source) && std::fs::metadata(source).is_err() {
        return Err(ArchiveError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    let file = File::create(output)?;
    let mut walker = FilteredWalker::new(source, &ignore);
    if let Some(id) = FileId::of(output, &file.metadata()?) {
        walker = walker.with_excluded_file(id);
    }

    let writer = CountingWriter::new(BufWriter::new(file));
    let encoder = GzEncoder::new(writer, compression_level_to_flate2(config.compression_level));
    let mut builder = Builder::new(encoder);
    let start = Instant::now();

    let mut report = CreationReport::default();
    for entry in walker {
        add_entry(&mut builder, &entry?, config, &mut report)?;
    }

    // The tar trailer goes in first, then the gzip trailer.
    let encoder = builder.into_inner()?;
    let writer = encoder.finish()?;
    report.bytes_compressed = writer.total_bytes();

    let mut buffered = writer.into_inner();
    buffered.flush()?;
    drop(buffered.into_inner().map_err(std::io::IntoInnerError::into_error)?);

    report.duration = start.elapsed();
    Ok(report)
}

fn add_entry<W: Write>(
    builder: &mut Builder<W>,
    entry: &WalkEntry,
    config: &CreationConfig,
    report: &mut CreationReport,
) -> Result<()> {
    match (entry.kind, &entry.metadata) {
        (WalkKind::Directory, Some(metadata)) => {
            // A root like "." has no storable name of its own.
            if entry.entry_name.is_empty() {
                return Ok(());
            }
            let mut header = header_from_metadata(metadata, tar::EntryType::Directory, config);
            builder.append_data(&mut header, &entry.entry_name, std::io::empty())?;
            report.directories_added += 1;
        }
        (WalkKind::File, Some(metadata)) => {
            let file = File::open(&entry.path)?;
            report.bytes_read +=
                append_file_entry(builder, &entry.entry_name, metadata, file, config)?;
            report.files_added += 1;
        }
        (WalkKind::Special, _) => {
            log::warn!("skipping special file {}", entry.path.display());
            report.files_skipped += 1;
            report.add_warning(format!("skipped special file {}", entry.path.display()));
        }
        (WalkKind::Ignored, _) | (_, None) => report.paths_ignored += 1,
    }

    Ok(())
}

/// Appends one regular file entry named `name` and returns its payload size.
///
/// The payload is capped at the size recorded in the header so a file that
/// grows while being read cannot corrupt the stream.
pub(crate) fn append_file_entry<W: Write, R: Read>(
    builder: &mut Builder<W>,
    name: &str,
    metadata: &Metadata,
    contents: R,
    config: &CreationConfig,
) -> Result<u64> {
    let mut header = header_from_metadata(metadata, tar::EntryType::Regular, config);
    let size = header.size()?;
    builder.append_data(&mut header, name, contents.take(size))?;
    log::trace!("appended {name} ({size} bytes)");
    Ok(size)
}

/// Builds a GNU header for a file or directory from filesystem metadata.
///
/// The path and checksum are filled in by `Builder::append_data`.
pub(crate) fn header_from_metadata(
    metadata: &Metadata,
    entry_type: tar::EntryType,
    config: &CreationConfig,
) -> Header {
    let mut header = Header::new_gnu();
    header.set_entry_type(entry_type);
    header.set_size(if entry_type.is_file() { metadata.len() } else { 0 });

    if config.preserve_permissions {
        set_permissions(&mut header, metadata);
    } else {
        header.set_mode(if entry_type.is_dir() { 0o755 } else { 0o644 });
        header.set_uid(0);
        header.set_gid(0);
        header.set_mtime(0);
    }

    header
}

/// Sets file permissions in TAR header from metadata.
#[cfg(unix)]
fn set_permissions(header: &mut Header, metadata: &Metadata) {
    use std::os::unix::fs::MetadataExt;
    header.set_mode(metadata.mode() & 0o7777);
    header.set_uid(u64::from(metadata.uid()));
    header.set_gid(u64::from(metadata.gid()));
    // mtime can be negative for dates before epoch, clamp to 0
    #[allow(clippy::cast_sign_loss)] // Intentional: clamped to non-negative
    let mtime = metadata.mtime().max(0) as u64;
    header.set_mtime(mtime);
}

#[cfg(not(unix))]
fn set_permissions(header: &mut Header, metadata: &Metadata) {
    let mode = if metadata.is_dir() {
        0o755
    } else if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    };
    header.set_mode(mode);

    if let Ok(modified) = metadata.modified()
        && let Ok(duration) = modified.duration_since(std::time::UNIX_EPOCH)
    {
        header.set_mtime(duration.as_secs());
    }
}
