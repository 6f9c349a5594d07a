//! Directory tree walking with ignore rules.
//!
//! Traversal is pre-order: a directory is yielded before anything it
//! contains, and children come in filesystem enumeration order (unsorted).
//! Symlinks are followed, so they appear as the file or directory they point
//! to. The walk keeps an explicit stack, so deep trees do not recurse.

use crate::ArchiveError;
use crate::Result;
use crate::creation::filters;
use crate::creation::filters::IgnoreSet;
use std::fs::Metadata;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Walks a source tree, pruning everything the ignore set matches.
///
/// Ignored paths are still yielded (as [`WalkKind::Ignored`]) so callers can
/// report them, but an ignored directory is never descended into.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::creation::filters::IgnoreSet;
/// use dirpack_core::creation::walker::FilteredWalker;
/// use std::path::Path;
///
/// let ignore = IgnoreSet::new(&["target", "*.log"]);
/// for entry in FilteredWalker::new(Path::new("./project"), &ignore) {
///     let entry = entry?;
///     println!("{:?} {}", entry.kind, entry.path.display());
/// }
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
pub struct FilteredWalker<'a> {
    inner: walkdir::IntoIter,
    ignore: &'a IgnoreSet,
    excluded: Option<FileId>,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: &Path, ignore: &'a IgnoreSet) -> Self {
        Self {
            inner: WalkDir::new(root).follow_links(true).into_iter(),
            ignore,
            excluded: None,
        }
    }

    /// Also skips the regular file identified by `id`, through whatever
    /// path the walk reaches it.
    #[must_use]
    pub fn with_excluded_file(mut self, id: FileId) -> Self {
        self.excluded = Some(id);
        self
    }

    fn ignored(path: PathBuf) -> WalkEntry {
        log::info!("ignoring {}", path.display());
        WalkEntry {
            path,
            entry_name: String::new(),
            kind: WalkKind::Ignored,
            metadata: None,
        }
    }

    fn build_entry(&self, entry: &walkdir::DirEntry) -> Result<WalkEntry> {
        let path = entry.path().to_path_buf();
        let metadata = entry.metadata().map_err(walk_error)?;

        let kind = if metadata.is_dir() {
            WalkKind::Directory
        } else if metadata.is_file() {
            WalkKind::File
        } else {
            WalkKind::Special
        };

        if kind == WalkKind::File
            && let Some(excluded) = &self.excluded
            && FileId::of(&path, &metadata).as_ref() == Some(excluded)
        {
            return Ok(Self::ignored(path));
        }

        let entry_name = filters::entry_name(&path)?;

        Ok(WalkEntry {
            path,
            entry_name,
            kind,
            metadata: Some(metadata),
        })
    }
}

impl Iterator for FilteredWalker<'_> {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(e) => {
                // A broken link that the rules exclude is not an error.
                if let Some(path) = e.path()
                    && self.ignore.matches(path)
                {
                    return Some(Ok(Self::ignored(path.to_path_buf())));
                }
                return Some(Err(walk_error(e)));
            }
        };

        if self.ignore.matches(entry.path()) {
            if entry.file_type().is_dir() {
                self.inner.skip_current_dir();
            }
            return Some(Ok(Self::ignored(entry.into_path())));
        }

        Some(self.build_entry(&entry))
    }
}

/// One visited path.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Traversal path (the root joined with each child name).
    pub path: PathBuf,

    /// Name to store in the archive; empty for ignored entries and for a
    /// root such as `.` that has no storable name.
    pub entry_name: String,

    /// What was found at `path`.
    pub kind: WalkKind,

    /// Metadata of the path (symlinks followed); `None` when ignored.
    pub metadata: Option<Metadata>,
}

/// Kind of a visited path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Socket, FIFO, device or anything else that is not archived.
    Special,

    /// Excluded by the ignore set.
    Ignored,
}

/// Identity of a file on disk, independent of the path used to reach it.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileId {
    dev: u64,
    ino: u64,
}

#[cfg(unix)]
impl FileId {
    /// Identity of the file at `path`, whose (symlink-followed) metadata is
    /// `metadata`.
    pub fn of(_path: &Path, metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }
}

/// Identity of a file on disk, independent of the path used to reach it.
#[cfg(not(unix))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileId(PathBuf);

#[cfg(not(unix))]
impl FileId {
    /// Identity of the file at `path`; `None` if it cannot be resolved.
    pub fn of(path: &Path, _metadata: &Metadata) -> Option<Self> {
        std::fs::canonicalize(path).ok().map(Self)
    }
}

fn walk_error(err: walkdir::Error) -> ArchiveError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(io) => ArchiveError::Io(io),
        None => ArchiveError::Io(std::io::Error::other(message)),
    }
}
