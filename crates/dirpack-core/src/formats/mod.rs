//! Archive format helpers.
//!
//! Archives are always a gzip envelope around a tar entry stream.

pub mod detect;

pub use detect::is_gzip;
pub use detect::open_tar_gz;
