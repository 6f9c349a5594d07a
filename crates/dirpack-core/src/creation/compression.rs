//! Compression level conversion.
//!
//! User levels follow a consistent scale:
//!
//! - **1-3**: Fast compression (lower CPU usage, larger files)
//! - **6**: Default compression (balanced)
//! - **7-9**: Best compression (higher CPU usage, smaller files)

/// Converts user compression level (1-9) to flate2 compression level.
///
/// # Mapping
///
/// - `None` or `Some(6)`: Default compression
/// - `1-3`: Fast compression
/// - `7-9`: Best compression
/// - Other values: Literal level (clamped to 9)
///
/// # Examples
///
/// ```
/// use dirpack_core::creation::compression::compression_level_to_flate2;
///
/// assert_eq!(compression_level_to_flate2(None), flate2::Compression::default());
/// assert_eq!(compression_level_to_flate2(Some(1)), flate2::Compression::fast());
/// assert_eq!(compression_level_to_flate2(Some(9)), flate2::Compression::best());
/// ```
#[must_use]
pub fn compression_level_to_flate2(level: Option<u8>) -> flate2::Compression {
    match level {
        None | Some(6) => flate2::Compression::default(),
        Some(1..=3) => flate2::Compression::fast(),
        Some(7..=9) => flate2::Compression::best(),
        Some(n) => flate2::Compression::new(u32::from(n.min(9))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flate2_levels() {
        assert_eq!(compression_level_to_flate2(None).level(), 6);
        assert_eq!(compression_level_to_flate2(Some(6)).level(), 6);
        assert_eq!(compression_level_to_flate2(Some(2)).level(), 1);
        assert_eq!(compression_level_to_flate2(Some(8)).level(), 9);
        assert_eq!(compression_level_to_flate2(Some(4)).level(), 4);
    }

    #[test]
    fn test_flate2_level_out_of_range_is_clamped() {
        assert_eq!(compression_level_to_flate2(Some(42)).level(), 9);
    }
}
