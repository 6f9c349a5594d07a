//! Mapping of stored entry names onto the destination directory.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;

/// Converts a stored entry name into a path relative to the destination.
///
/// Root and `.` components are dropped, so `/etc/motd` and `./etc/motd` both
/// land at `etc/motd`. A `..` component anywhere in the name is rejected.
/// The result is empty for names such as `.` or `/`, which refer to the
/// destination itself.
///
/// # Errors
///
/// Returns [`ArchiveError::PathTraversal`] if the name contains `..`.
pub fn sanitize_entry_path(name: &Path) -> Result<PathBuf> {
    let mut relative = PathBuf::new();

    for component in name.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                return Err(ArchiveError::PathTraversal {
                    path: name.to_path_buf(),
                });
            }
        }
    }

    Ok(relative)
}
