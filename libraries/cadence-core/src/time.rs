//! Time display helpers for the progress bar

/// Format a position in seconds as `m:ss`.
///
/// Non-finite and negative inputs (an unloaded media element reports NaN)
/// render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Playback progress as a percentage in `0.0..=100.0`.
///
/// Returns 0 while the duration is unknown.
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }

    (current / duration * 100.0).clamp(0.0, 100.0)
}
