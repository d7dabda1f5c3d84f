//! Display formatting for amounts, durations, and timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// XAF amount with thousands grouping and no decimals.
pub fn format_xaf(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped} XAF")
    } else {
        format!("{grouped} XAF")
    }
}

/// Seconds rounded to whole minutes, e.g. `"7 min"`.
pub fn minutes_label(seconds: f64) -> String {
    format!("{:.0} min", (seconds / 60.0).round())
}

/// A 0..1 rate as a percentage with one decimal.
pub fn percent_label(rate: f64) -> String {
    format!("{:.1} %", rate * 100.0)
}

/// The `HH:MM:SS` portion of an ISO-8601 timestamp, or the raw string
/// when it is too short to slice.
pub fn clock_label(iso: &str) -> &str {
    iso.get(11..19).unwrap_or(iso)
}

/// The `YYYY-MM-DD` portion of an ISO-8601 timestamp.
pub fn date_label(iso: &str) -> &str {
    iso.get(0..10).unwrap_or(iso)
}
