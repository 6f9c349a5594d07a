//! Directory packing library for gzip-compressed tar archives.
//!
//! `dirpack-core` builds a `.tar.gz` from a directory tree with glob-based
//! exclusion, restores such an archive onto disk, appends a single file to
//! an archive handle, and inspects archive buffers without extracting them.
//!
//! # Examples
//!
//! ```no_run
//! use dirpack_core::contains_entry;
//! use dirpack_core::create_archive;
//! use dirpack_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! create_archive("project", "project.tar.gz", &["*.log"])?;
//!
//! let data = std::fs::read("project.tar.gz")?;
//! assert!(!contains_entry(&data, "project/debug.log"));
//!
//! let report = extract_archive("project.tar.gz", "/tmp/restore")?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```
//!
//! The library logs through the [`log`] facade; install any logger to see
//! skipped paths and per-entry activity.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod append;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod io;
pub mod report;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main API types
pub use api::create_archive;
pub use api::create_archive_with_config;
pub use api::extract_archive;
pub use append::append_file;
pub use append::append_file_with_config;
pub use creation::CreationConfig;
pub use creation::CreationReport;
pub use error::ArchiveError;
pub use error::Result;
pub use inspection::ArchiveEntry;
pub use inspection::EntryKind;
pub use inspection::contains_entry;
pub use inspection::list_entries;
pub use report::ExtractionReport;
