use crate::app::form::{DatasetForm, FormField};
use crate::app::App;
use crate::ui::widgets::hints::shortcuts_line;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use space_weather_explorer::{Operation, OutputFormat};

/// Rows of the dataset list shown at once
const DATASET_ROWS: usize = 8;

pub fn render_datasets(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(f.area().inner(Margin::new(1, 0)));

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[0]);

    render_form(app, f, content[0]);
    render_urls(app, f, content[1]);

    let shortcuts = shortcuts_line(&[
        ("Tab/Shift+Tab", "Field"),
        ("↑/↓", "Move"),
        ("Enter", "Toggle"),
        ("F2/Esc", "Dashboard"),
        ("F1", "Help"),
    ]);
    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        layout[1],
    );
}

fn field_heading(form: &DatasetForm, field: FormField) -> TextLine<'static> {
    let focused = form.field == field;
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let marker = if focused { "> " } else { "  " };

    let mut spans = vec![Span::styled(format!("{marker}{}", field.label()), style)];
    if let Some(error) = form.field_error(field) {
        spans.push(Span::styled(
            format!("  ({error})"),
            Style::default().fg(Color::Red),
        ));
    }
    TextLine::from(spans)
}

fn cursor_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn text_input(form: &DatasetForm, field: FormField, value: &str, placeholder: &str) -> TextLine<'static> {
    let focused = form.field == field;
    let mut spans = vec![Span::raw("    ")];
    if value.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(value.to_string()));
    }
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    TextLine::from(spans)
}

fn render_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let form = &app.form;
    let mut lines = Vec::new();

    lines.push(field_heading(form, FormField::Datasets));
    lines.push(TextLine::from(vec![
        Span::styled("    filter: ", Style::default().fg(Color::Gray)),
        Span::raw(form.filter.clone()),
        Span::styled(
            if form.field == FormField::Datasets { "_" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]));
    lines.extend(dataset_lines(app));
    lines.push(TextLine::from(""));

    lines.push(field_heading(form, FormField::TimeStart));
    lines.push(text_input(form, FormField::TimeStart, &form.time_start_input, "YYYY-MM-DD"));
    lines.push(field_heading(form, FormField::TimeEnd));
    lines.push(text_input(form, FormField::TimeEnd, &form.time_end_input, "YYYY-MM-DD"));
    lines.push(field_heading(form, FormField::Limit));
    lines.push(text_input(form, FormField::Limit, &form.limit_input, "10"));
    lines.push(TextLine::from(""));

    lines.push(field_heading(form, FormField::Format));
    let format_spans = OutputFormat::ALL
        .iter()
        .map(|format| {
            let chosen = *format == form.format;
            let mark = if chosen { "(•)" } else { "( )" };
            Span::styled(
                format!("    {mark} {}", format.extension()),
                if chosen {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                },
            )
        })
        .collect::<Vec<_>>();
    lines.push(TextLine::from(format_spans));
    lines.push(TextLine::from(""));

    lines.push(field_heading(form, FormField::Operations));
    for (i, operation) in Operation::ALL.iter().enumerate() {
        let active = form.field == FormField::Operations && i == form.operation_cursor;
        let mark = if form.is_operation_chosen(*operation) {
            "[x]"
        } else {
            "[ ]"
        };
        lines.push(TextLine::from(vec![
            Span::raw("    "),
            Span::styled(format!("{mark} {}", operation.as_str()), cursor_style(active)),
        ]));
    }
    lines.push(TextLine::from(""));

    lines.push(field_heading(form, FormField::OperationValues));
    if form.operations.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "    (no operations selected)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, (operation, value)) in form.operations.iter().enumerate() {
        let active = form.field == FormField::OperationValues && i == form.value_cursor;
        let shown = if value.is_empty() && !active {
            Span::styled(operation.hint(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value.clone())
        };
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("    {}: ", operation.as_str()),
                cursor_style(active),
            ),
            shown,
            Span::styled(if active { "_" } else { "" }, Style::default().fg(Color::Yellow)),
        ]));
    }

    let block = Block::default()
        .title(" Dataset Configuration ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn dataset_lines(app: &App) -> Vec<TextLine<'static>> {
    let form = &app.form;
    let visible = form.visible_datasets(app.catalog());

    if visible.is_empty() {
        return vec![TextLine::from(Span::styled(
            "    (no matching datasets)",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let offset = scroll_offset(visible.len(), DATASET_ROWS, form.dataset_cursor);
    let mut lines: Vec<TextLine<'static>> = visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(DATASET_ROWS)
        .map(|(i, name)| {
            let active = form.field == FormField::Datasets && i == form.dataset_cursor;
            let mark = if form.is_selected(name) { "[x]" } else { "[ ]" };
            TextLine::from(vec![
                Span::raw("    "),
                Span::styled(format!("{mark} {name}"), cursor_style(active)),
            ])
        })
        .collect();

    if visible.len() > DATASET_ROWS {
        lines.push(TextLine::from(Span::styled(
            format!("    {} of {} datasets", form.dataset_cursor + 1, visible.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn render_urls(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut lines = Vec::new();

    if app.dataset_urls.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "Select one or more datasets to generate URLs.",
            Style::default().fg(Color::Gray),
        )));
    }

    for (i, dataset) in app.dataset_urls.iter().enumerate() {
        lines.push(TextLine::from(Span::styled(
            format!("{}. {}", i + 1, dataset.name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(TextLine::from(Span::styled(
            dataset.url.clone(),
            Style::default().fg(Color::White),
        )));
        lines.push(TextLine::from(""));
    }

    let block = Block::default()
        .title(format!(" Generated URLs ({}) ", app.dataset_urls.len()))
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
