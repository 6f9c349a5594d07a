//! Archive inspection without extraction.
//!
//! Both functions work on an in-memory buffer, so an archive can be checked
//! before it is written to disk.
//!
//! # Examples
//!
//! ```no_run
//! use dirpack_core::contains_entry;
//! use dirpack_core::list_entries;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("backup.tar.gz")?;
//! if !contains_entry(&data, "backup/manifest.json") {
//!     println!("{} entries, no manifest", list_entries(&data)?.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod manifest;

pub use list::contains_entry;
pub use list::list_entries;
pub use manifest::ArchiveEntry;
pub use manifest::EntryKind;
