use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// A single `key: action | key: action` line for the bottom of a screen.
pub fn shortcuts_line(pairs: &[(&'static str, &'static str)]) -> TextLine<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (i, (key, action)) in pairs.iter().enumerate() {
        spans.push(Span::styled(*key, key_style()));
        let separator = if i + 1 == pairs.len() { "" } else { " | " };
        spans.push(Span::styled(
            format!(": {action}{separator}"),
            Style::default().fg(Color::Gray),
        ));
    }
    TextLine::from(spans)
}

/// An indented `key - description` line for the help popup.
pub fn help_line(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("  {key}"), key_style()),
        Span::raw(format!(" - {description}")),
    ])
}
