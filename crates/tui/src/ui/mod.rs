pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let info = Line::from(vec![
        Span::styled("Store", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.store_path)),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}")),
    ]);
    frame.render_widget(Paragraph::new(info), layout[0]);

    screens::stats::render(frame, layout[1], state, &theme);

    let hints = Line::from(vec![
        Span::styled("r", Style::default().fg(theme.accent)),
        Span::raw(" refresh"),
        Span::styled("  │  ", Style::default().fg(theme.border)),
        Span::styled("q", Style::default().fg(theme.accent)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), layout[2]);
}
