//! Pure formatting helpers for display layers.

/// Formats a second count as zero-padded `HH:MM:SS`.
///
/// Hours widen past two digits rather than wrapping, so multi-day uptimes
/// stay unambiguous.
pub fn elapsed_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Formats a `0.0..=1.0` ratio as a percentage with one decimal.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
