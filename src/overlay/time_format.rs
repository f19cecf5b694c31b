//! Time label and slider position helpers

/// Label shown when no time is known
pub const EMPTY_TIME: &str = "00:00:00";

/// Format seconds as zero-padded `HH:MM:SS`, rounding to the nearest second
///
/// Negative or non-finite input yields [`EMPTY_TIME`]. Hours are not
/// wrapped, so very long media renders three or more hour digits.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return EMPTY_TIME.to_string();
    }

    let total = seconds.round() as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Normalized slider position for `elapsed` out of `total`
///
/// Always in `[0, 1]`; zero when the duration is unknown.
pub fn scrub_position(elapsed: f64, total: f64) -> f32 {
    if !total.is_finite() || total <= 0.0 {
        return 0.0;
    }

    let ratio = elapsed / total;
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0) as f32
    }
}

/// Elapsed and remaining labels for a position within `total`
pub fn time_labels(elapsed: f64, total: f64) -> (String, String) {
    (format_time(elapsed), format_time((total - elapsed).max(0.0)))
}

/// Clamp a slider value into `[0, 1]`, mapping NaN to zero
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
