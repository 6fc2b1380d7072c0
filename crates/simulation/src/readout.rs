//! Text for the altitude counter and temperature display.

use crate::config::COUNTER_DIGITS;

/// Whole meters, zero-padded to the counter width. Wider values are not cut.
pub fn format_altitude_counter(altitude: f64) -> String {
    let meters = if altitude.is_finite() { altitude.max(0.0) as u64 } else { 0 };
    format!("{meters:0width$}", width = COUNTER_DIGITS)
}

pub fn format_temperature(celsius: i32) -> String {
    format!("{celsius}°C")
}
