//! Archive creation module.
//!
//! Builds gzip-compressed TAR archives from a directory tree, honoring
//! per-call ignore patterns.

pub mod compression;
pub mod config;
pub mod filters;
pub mod report;
pub mod tar;
pub mod walker;

pub use config::CreationConfig;
pub use filters::IgnoreSet;
pub use report::CreationReport;
pub use walker::FilteredWalker;
pub use walker::WalkEntry;
pub use walker::WalkKind;
