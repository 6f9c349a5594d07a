//! Gzip envelope detection and tar.gz stream opening.

use std::io::BufRead;

use flate2::bufread::MultiGzDecoder;

use crate::ArchiveError;
use crate::Result;

/// Gzip member magic bytes (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns `true` if `data` starts with a gzip member header.
///
/// # Examples
///
/// ```
/// use dirpack_core::formats::detect::is_gzip;
///
/// assert!(is_gzip(&[0x1f, 0x8b, 0x08, 0x00]));
/// assert!(!is_gzip(b"plain text"));
/// assert!(!is_gzip(&[]));
/// ```
#[must_use]
pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Opens a gzip-compressed tar stream for sequential reading.
///
/// The gzip magic is checked up front, so a foreign file is rejected before
/// any entry is read. Consecutive gzip members are decoded as one stream.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidArchive`] if the stream does not start with
/// a gzip header, or an I/O error if the reader fails.
pub fn open_tar_gz<R: BufRead>(mut reader: R) -> Result<tar::Archive<MultiGzDecoder<R>>> {
    if !is_gzip(reader.fill_buf()?) {
        return Err(ArchiveError::InvalidArchive(
            "missing gzip header".to_string(),
        ));
    }
    Ok(tar::Archive::new(MultiGzDecoder::new(reader)))
}

/// Classifies an error raised while decoding entries.
///
/// Decoder and header failures (bad deflate data, checksum mismatch,
/// truncation) become [`ArchiveError::InvalidArchive`]; anything else is
/// passed through as I/O.
pub(crate) fn decode_error(err: std::io::Error) -> ArchiveError {
    use std::io::ErrorKind;

    match err.kind() {
        // tar reports malformed headers as `Other`
        ErrorKind::InvalidData
        | ErrorKind::InvalidInput
        | ErrorKind::UnexpectedEof
        | ErrorKind::Other => ArchiveError::InvalidArchive(err.to_string()),
        _ => ArchiveError::Io(err),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarGzBuilder;

    #[test]
    fn test_open_rejects_non_gzip() {
        let result = open_tar_gz(&b"this is not gzip"[..]);
        assert!(matches!(result, Err(ArchiveError::InvalidArchive(_))));
    }

    #[test]
    fn test_open_rejects_empty_input() {
        let result = open_tar_gz(&[0u8; 0][..]);
        assert!(matches!(result, Err(ArchiveError::InvalidArchive(_))));
    }

    #[test]
    fn test_open_reads_entries() {
        let data = TarGzBuilder::new()
            .add_directory("dir")
            .add_file("dir/a.txt", b"hello")
            .build();
        assert!(is_gzip(&data));

        let mut archive = open_tar_gz(&data[..]).unwrap();
        let names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| String::from_utf8_lossy(&e.unwrap().path_bytes()).into_owned())
            .collect();
        assert_eq!(names, vec!["dir", "dir/a.txt"]);
    }

    #[test]
    fn test_decode_error_classification() {
        let err = decode_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "corrupt deflate stream",
        ));
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));

        let err = decode_error(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(err, ArchiveError::Io(_)));
    }
}
