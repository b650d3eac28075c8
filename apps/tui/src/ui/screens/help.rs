use crate::app::{App, AppScreen};
use crate::cli::CliArgs;
use crate::ui::widgets::hints::help_line;
use crate::ui::widgets::popup::render_popup;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::Frame;

pub fn render_help_popup(app: &App, f: &mut Frame<'_>) {
    let hint = match app.screen {
        AppScreen::Dashboard => "Press ?, F1 or Esc to close",
        AppScreen::Datasets => "Press F1 or Esc to close",
    };
    let area = f.area();
    render_popup(f, area, "Help & Keyboard Shortcuts", build_help_lines(), hint);
}

fn section(title: &'static str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Space Weather Analysis",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Plots recent DONKI geomagnetic storms, solar flares and coronal mass \
             ejections, and builds LaTiS download URLs for space weather datasets.",
        ),
        TextLine::from(""),
        section("Everywhere"),
        help_line("F1", "Toggle this help popup"),
        help_line("F2", "Switch between dashboard and datasets"),
        TextLine::from(""),
        section("Dashboard"),
        help_line("r", "Refetch events"),
        help_line("p", "Toggle world map / globe"),
        help_line("Space", "Pause or resume globe rotation"),
        help_line("Left/Right", "Switch info tab"),
        help_line("Up/Down PgUp/PgDn Home/End", "Scroll the event table"),
        help_line("d/Tab", "Open the dataset form"),
        help_line("q", "Quit"),
        TextLine::from(""),
        section("Datasets"),
        help_line("Tab/Shift+Tab", "Next / previous field"),
        help_line("Up/Down", "Move within a list, or between fields"),
        help_line("Enter", "Toggle the dataset under the cursor"),
        help_line("Space/Enter", "Toggle format or operation"),
        help_line("type", "Filter datasets (spaces allowed) or edit the focused value"),
        help_line("Esc", "Back to the dashboard"),
        TextLine::from(""),
        section("Command line"),
    ];

    lines.extend(
        CliArgs::help_text()
            .lines()
            .map(|line| TextLine::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray)))),
    );
    lines
}
