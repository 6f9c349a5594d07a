//! Archive extraction.
//!
//! Entries are restored one at a time in stored order. Entry names are
//! confined to the destination directory before anything is written.

pub mod path;
pub mod tar;

pub use tar::extract_from_reader;
pub use tar::extract_tar_gz;
