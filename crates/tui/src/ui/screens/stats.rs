use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::{
    ChartStyle, SummaryView,
    format::{EMPTY_PLACEHOLDER, capitalize, format_forint, round_half_up},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, fit_bar_width, render_bar_chart},
        },
        theme::Theme,
    },
};

const SHARE_BAR_WIDTH: usize = 20;
const MIN_BAR_WIDTH: u16 = 3;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let breakdown_height = u16::try_from(state.totals.len())
        .unwrap_or(u16::MAX)
        .clamp(1, 10)
        .saturating_add(2);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // Summary cards
            Constraint::Length(breakdown_height), // Category breakdown
            Constraint::Min(6),                   // Bar chart
        ])
        .split(area);

    render_summary(frame, layout[0], state, theme);
    render_category_breakdown(frame, layout[1], state, theme);
    render_category_chart(frame, layout[2], state, theme);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let view = SummaryView::new(&state.summary, &state.totals);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    StatCard::new("Összes költés", view.total, theme).render(frame, cols[0]);
    StatCard::new("Tételek száma", view.count, theme).render(frame, cols[1]);
    StatCard::new("Legnagyobb tétel", view.max, theme).render(frame, cols[2]);
}

fn render_category_breakdown(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Kategóriák", theme);

    if state.totals.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(EMPTY_PLACEHOLDER, Style::default().fg(theme.dim)))
                .alignment(Alignment::Center),
        );
        return;
    }

    let total = state.totals.total();
    let rows: Vec<Line> = state
        .totals
        .iter()
        .map(|(category, amount)| {
            let pct = if total > 0.0 && amount > 0.0 {
                (amount / total * 100.0).min(100.0) as u16
            } else {
                0
            };

            Line::from(vec![
                Span::styled(
                    format!("{:<16}", truncate(&capitalize(category), 15)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:>12}", format_forint(amount)),
                    Style::default().fg(theme.text),
                ),
                Span::raw("  "),
                Span::styled(
                    ascii_bar(amount, total, SHARE_BAR_WIDTH),
                    Style::default().fg(theme.bar),
                ),
                Span::styled(format!(" {pct:>3}%"), Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    card.render_with(frame, area, Paragraph::new(rows));
}

fn render_category_chart(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if state.totals.is_empty() {
        let placeholder = ChartStyle::default().placeholder;
        Card::new("Grafikon", theme).render_with(
            frame,
            area,
            Paragraph::new(Span::styled(placeholder, Style::default().fg(theme.dim))),
        );
        return;
    }

    let labels: Vec<String> = state.totals.keys().map(capitalize).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(state.totals.iter())
        .map(|(label, (_, value))| (label.as_str(), bar_value(value)))
        .collect();

    let inner_width = Card::new("", theme).inner(area).width;
    let bar_width = fit_bar_width(inner_width, data.len(), MIN_BAR_WIDTH);
    render_bar_chart(frame, area, "Grafikon", &data, bar_width, theme);
}

/// Terminal bars cannot go below the axis, so negative totals draw empty.
fn bar_value(value: f64) -> u64 {
    let rounded = round_half_up(value);
    if rounded > 0.0 { rounded as u64 } else { 0 }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
