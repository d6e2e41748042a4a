//! Reusable widgets for the TUI
//!
//! Common UI components used across the three screens.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::theme::Theme;

/// Render a loading message
pub fn loading_message(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = Paragraph::new(Line::from(vec![
        Span::styled("⟳ ", Style::default().fg(theme.accent)),
        Span::styled(message.to_string(), Style::default().fg(theme.muted)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(text, area);
}

/// Build the spans for a key-hint footer line
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)], theme: &Theme) -> Line<'a> {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(*action, Style::default().fg(theme.muted)),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Build one editor line: label, value, and a focus marker
pub fn input_line<'a>(
    label: &'a str,
    value: String,
    focused: bool,
    theme: &Theme,
) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let value_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(format!("{label:<12}"), Style::default().fg(theme.muted)),
        Span::styled(value, value_style),
        if focused {
            Span::styled("▏", Style::default().fg(theme.accent))
        } else {
            Span::raw("")
        },
    ])
}

/// Centered rectangle for the editor overlay
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Format a movie runtime in minutes as a short human string
pub fn format_runtime(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}
