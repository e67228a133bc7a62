use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::BarChart,
};

use crate::ui::{components::card::Card, theme::Theme};

/// Vertical bar chart inside a card, one bar per `(label, value)`.
pub fn render_bar_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    data: &[(&str, u64)],
    bar_width: u16,
    theme: &Theme,
) {
    let chart = BarChart::default()
        .data(data)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.bar))
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.dim));

    Card::new(title, theme).render_with(frame, area, chart);
}

/// Horizontal bar such as `████████░░░░`, filled by `value / max`.
///
/// Non-positive values and maxima give an empty bar.
#[must_use]
pub fn ascii_bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) || !(value > 0.0) {
        return "░".repeat(width);
    }

    let ratio = (value / max).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Width of each bar so that `count` bars with one-column gaps fill `width`,
/// never below `min`.
#[must_use]
pub fn fit_bar_width(width: u16, count: usize, min: u16) -> u16 {
    if count == 0 {
        return min;
    }
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let gaps = count.saturating_sub(1);
    (width.saturating_sub(gaps) / count).max(min)
}
