//! Human-readable durations for scoreboards and dashboards.

/// Whole seconds, clamping negative and non-finite input to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    }
}

/// Formats a match clock: `M:SS` under an hour, `H:MM:SS` otherwise.
pub fn format_clock(secs: f64) -> String {
    let total = whole_seconds(secs);
    let hours = total / 3600;
    let minutes = total / 60 % 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Formats accumulated play time as `Xh Ym`, or `Xm` under an hour.
pub fn format_play_time(secs: f64) -> String {
    let total = whole_seconds(secs);
    let hours = total / 3600;
    let minutes = total / 60 % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats a duration as whole minutes, e.g. `95m`.
pub fn format_minutes(secs: f64) -> String {
    format!("{}m", whole_seconds(secs) / 60)
}
