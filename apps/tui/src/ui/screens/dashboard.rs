use crate::app::state::INFO_TABS;
use crate::app::App;
use crate::ui::widgets::globe::{category_color, legend_lines, render_globe_panel};
use crate::ui::widgets::hints::shortcuts_line;
use crate::ui::widgets::tables::{scroll_offset, selected_row_style, truncate};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;
use space_weather_explorer::geo::{storm_ring, CME_POSITION, STORM_RING_POINTS};

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Globe and info panel
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title(app, f, layout[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);

    render_globe_panel(app, f, content[0]);
    render_info_panel(app, f, content[1]);
    render_status(app, f, layout[2]);

    let shortcuts = shortcuts_line(&[
        ("r", "Refresh"),
        ("p", "Projection"),
        ("Space", "Pause"),
        ("←/→", "Tabs"),
        ("↑/↓", "Events"),
        ("F2", "Datasets"),
        ("?", "Help"),
        ("q", "Quit"),
    ]);
    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        layout[3],
    );
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title = TextLine::from(vec![
        Span::styled(
            "Space Weather ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Analysis",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {}", app.window),
            Style::default().fg(Color::Gray),
        ),
    ]);

    f.render_widget(Paragraph::new(title).block(block), area);
}

fn render_info_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let tabs = Tabs::new(INFO_TABS.to_vec())
        .block(Block::default().borders(Borders::ALL).title(" Info "))
        .select(app.info_tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    match app.info_tab_index {
        0 => render_about(app, f, chunks[1]),
        _ => render_event_table(app, f, chunks[1]),
    }
}

fn render_about(app: &App, f: &mut Frame<'_>, area: Rect) {
    let heading = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        TextLine::from(Span::styled("Event Types", heading)),
        TextLine::from(""),
    ];
    lines.extend(legend_lines(&app.globe));
    lines.push(TextLine::from(""));

    let last_update = app.last_update.map_or_else(
        || "not fetched yet".to_string(),
        |time| time.format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    lines.push(TextLine::from(vec![
        Span::styled("Last Update: ", heading),
        Span::raw(last_update),
    ]));

    if !app.unavailable.is_empty() {
        let codes = app
            .unavailable
            .iter()
            .map(|category| category.code())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(TextLine::from(Span::styled(
            format!("Unavailable: {codes}"),
            Style::default().fg(Color::Red),
        )));
    }

    lines.extend([
        TextLine::from(""),
        TextLine::from(Span::styled("About the Data", heading)),
        TextLine::from(
            "Events come from NASA's DONKI (Space Weather Database Of Notifications, \
             Knowledge, Information).",
        ),
        TextLine::from(placement_note()),
    ]);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// How each category is placed on the map, derived from the mapper's constants.
fn placement_note() -> String {
    let (cme_lat, cme_lon) = CME_POSITION;
    let ring_span = storm_ring()
        .iter()
        .map(|(_, lon)| lon.abs())
        .fold(0.0_f64, f64::max);
    format!(
        "Flares sit at their source latitude, 45°E or 45°W. Storms draw a \
         {STORM_RING_POINTS}-point arc within ±{ring_span:.0}° longitude. CMEs are \
         pinned to the sun-facing point ({}, {}).",
        degrees(cme_lat, 'N', 'S'),
        degrees(cme_lon, 'E', 'W'),
    )
}

fn degrees(value: f64, positive: char, negative: char) -> String {
    if value.abs() < f64::EPSILON {
        return "0°".to_string();
    }
    let hemisphere = if value > 0.0 { positive } else { negative };
    format!("{:.0}°{hemisphere}", value.abs())
}

fn render_event_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.events.is_empty() {
        let paragraph = Paragraph::new("No events loaded.")
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Type"),
        Cell::from("Time"),
        Cell::from("Location"),
        Cell::from("ID"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = app.events.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_event_index);

    let rows = app
        .events
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, event)| {
            let style = if i == app.selected_event_index {
                selected_row_style()
            } else {
                Style::default().fg(category_color(event.category))
            };
            Row::new(vec![
                Cell::from(event.category.code()),
                Cell::from(event.display_time().to_string()),
                Cell::from(event.source_location.clone().unwrap_or_default()),
                Cell::from(truncate(event.id().unwrap_or("-"), 32)),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(4),
        Constraint::Length(18),
        Constraint::Length(8),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Events ({} of {}) ",
            app.selected_event_index + 1,
            total_rows
        )))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = if app.status_message.is_empty() {
        Span::styled(
            if app.animation_paused {
                "Rotation paused"
            } else {
                ""
            },
            Style::default().fg(Color::Gray),
        )
    } else {
        let style = if app.unavailable.is_empty() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        Span::styled(app.status_message.as_str(), style)
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_note_describes_plotted_positions() {
        let note = placement_note();
        assert!(note.contains("(0°, 90°W)"), "{note}");
        assert!(note.contains("12-point arc within ±57°"), "{note}");
        assert!(!note.contains("pole"));
    }
}
