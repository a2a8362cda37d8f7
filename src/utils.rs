//! Common utility functions shared across the codebase.

use std::time::Duration;

/// Formats a duration as `HH:MM:SS`, dropping sub-second precision.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use scenesift::utils::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
/// assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, rest) = (total / 3600, total % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// `"1 file"`, `"2 files"`.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}
