/*!
 * Human-readable formatting of timestamps and percentages.
 */

/// Format seconds as `MM:SS`, truncating fractional seconds
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}

/// Format a 0-1 fraction as a one-decimal percentage string, e.g. `22.2%`
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Parse a percentage string such as `22.2%` back into `22.2`
pub fn parse_percentage(text: &str) -> Option<f64> {
    text.trim().trim_end_matches('%').trim().parse::<f64>().ok()
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
