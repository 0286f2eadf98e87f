use contracts::shared::indicators::TrendDirection;

use crate::shared::format::format_percent_label;

/// Period-over-period change in percent.
///
/// A zero base reports 0 when nothing changed and 100 when something
/// appeared from nothing, so the result is always finite.
pub fn change_percent(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 {
            0.0
        } else {
            100.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// `+x.x%` / `-x.x%` / `0.0%` label of [`change_percent`].
pub fn trend_label(current: f64, previous: f64) -> String {
    format_percent_label(change_percent(current, previous))
}

/// Zero counts as up.
pub fn direction(change: f64) -> TrendDirection {
    if change >= 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}

pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 10.0).round() / 10.0;
    // avoid -0.0 in output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
