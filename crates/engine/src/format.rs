//! Text helpers shared by the chart labels, the CLI and the dashboard.
//!
//! Amounts are shown in whole forints.

/// Unit appended to formatted amounts.
pub const CURRENCY_SUFFIX: &str = " Ft";

/// Placeholder shown for the maximum when there are no entries.
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Upper-cases the first character and leaves the rest untouched.
///
/// ```rust
/// assert_eq!(engine::format::capitalize("élelmiszer"), "Élelmiszer");
/// assert_eq!(engine::format::capitalize(""), "");
/// ```
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rounds to the nearest integer, halves toward positive infinity.
///
/// This is the rounding used for the value labels above the bars, so
/// `-2.5` becomes `-2` and `2.5` becomes `3`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    // value - floor is exact, unlike value + 0.5
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    // -0.0 + 0.0 == +0.0, which keeps "-0" out of the labels
    rounded + 0.0
}

/// Formats with no decimals, halves away from zero.
#[must_use]
pub fn format_whole(value: f64) -> String {
    format!("{:.0}", value.round() + 0.0)
}

/// Formats a whole-forint amount, e.g. `1800 Ft`.
#[must_use]
pub fn format_forint(value: f64) -> String {
    format!("{}{CURRENCY_SUFFIX}", format_whole(value))
}
