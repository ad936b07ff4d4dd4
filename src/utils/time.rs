use chrono::{DateTime, Duration, Local};

/// Formats a duration as `HH:MM:SS`. Hours are not wrapped at 24 and negative durations are
/// shown as zero.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (mins, secs) = (total / 60, total % 60);
    let (hours, mins) = (mins / 60, mins % 60);
    format!("{hours:02}:{mins:02}:{secs:02}")
}

/// This is the standard way of showing a wall clock moment in worktally.
pub fn format_time_of_day(moment: DateTime<Local>) -> String {
    moment.format("%H:%M:%S").to_string()
}

/// Timestamp that is embedded into export file names.
pub fn export_timestamp(moment: DateTime<Local>) -> String {
    moment.format("%Y%m%d_%H%M%S").to_string()
}
