use chrono::{DateTime, Utc};

/// Renders the gap between two instants as e.g. `1h 2m 3.004s`.
pub fn format_dt_difference(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let total_ms = (to - from).num_milliseconds().max(0);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    match (hours, minutes) {
        (0, 0) => format!("{seconds}.{millis:03}s"),
        (0, _) => format!("{minutes}m {seconds}.{millis:03}s"),
        _ => format!("{hours}h {minutes}m {seconds}.{millis:03}s"),
    }
}
