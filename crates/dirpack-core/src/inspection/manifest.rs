//! Archive entry metadata.

/// Kind of an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Any other tar entry type, with its raw type flag.
    Other(u8),
}

impl From<tar::EntryType> for EntryKind {
    fn from(entry_type: tar::EntryType) -> Self {
        if entry_type.is_file() {
            Self::File
        } else if entry_type.is_dir() {
            Self::Directory
        } else {
            Self::Other(entry_type.as_byte())
        }
    }
}

/// Metadata of one archive entry, as stored in its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name exactly as stored (long names resolved).
    pub name: String,

    /// Entry kind.
    pub kind: EntryKind,

    /// Permission bits.
    pub mode: u32,

    /// Payload size in bytes (0 for directories).
    pub size: u64,

    /// Modification time in seconds since the Unix epoch.
    pub mtime: u64,
}
