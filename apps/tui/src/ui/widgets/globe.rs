use crate::app::{App, Projection};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use space_weather_explorer::globe::{orthographic, GlobeModel, ViewCenter};
use space_weather_explorer::{EventCategory, MarkerColor};

/// Graticule spacing on the orthographic globe, in degrees
const GRID_STEP: i32 = 30;

pub const fn marker_color(color: MarkerColor) -> Color {
    match color {
        MarkerColor::Red => Color::Red,
        MarkerColor::Yellow => Color::Yellow,
        MarkerColor::Blue => Color::Blue,
    }
}

pub fn category_color(category: EventCategory) -> Color {
    marker_color(category.marker_color())
}

pub fn render_globe_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" Global Space Weather Events - {} ", app.projection.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 4 {
        return;
    }

    if app.globe.is_empty() && app.last_update.is_some() {
        let paragraph = Paragraph::new("No events in this window")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    match app.projection {
        Projection::Map => render_world_map(&app.globe, f, chunks[0]),
        Projection::Globe => render_orthographic(&app.globe, app.view_center, f, chunks[0]),
    }

    f.render_widget(
        Paragraph::new(compact_legend()).alignment(Alignment::Center),
        chunks[1],
    );
}

fn compact_legend() -> TextLine<'static> {
    let spans = EventCategory::ALL
        .iter()
        .flat_map(|category| {
            [
                Span::styled("● ", Style::default().fg(category_color(*category))),
                Span::styled(
                    format!("{}  ", category.label()),
                    Style::default().fg(Color::Gray),
                ),
            ]
        })
        .collect::<Vec<_>>();
    TextLine::from(spans)
}

fn render_world_map(model: &GlobeModel, f: &mut Frame<'_>, area: Rect) {
    let layers: Vec<(Vec<(f64, f64)>, Color)> = model
        .layers
        .iter()
        .map(|layer| (layer.coords(), marker_color(layer.color)))
        .collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });

    f.render_widget(canvas, area);
}

fn render_orthographic(model: &GlobeModel, center: ViewCenter, f: &mut Frame<'_>, area: Rect) {
    // Terminal cells are about twice as tall as wide
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).max(1);
    let square = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let grid = graticule(center);
    let layers: Vec<(Vec<(f64, f64)>, Color)> = model
        .layers
        .iter()
        .map(|layer| {
            let coords = layer
                .points
                .iter()
                .filter_map(|point| orthographic(point.latitude, point.longitude, center))
                .collect();
            (coords, marker_color(layer.color))
        })
        .collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.05, 1.05])
        .y_bounds([-1.05, 1.05])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::Cyan,
            });
            ctx.draw(&Points {
                coords: &grid,
                color: Color::DarkGray,
            });
            ctx.layer();
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });

    f.render_widget(canvas, square);
}

/// Visible points of the parallels and meridians every [`GRID_STEP`] degrees
fn graticule(center: ViewCenter) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    for lat in (-90 + GRID_STEP..90).step_by(GRID_STEP as usize) {
        for lon in (-180..180).step_by(3) {
            points.extend(orthographic(f64::from(lat), f64::from(lon), center));
        }
    }
    for lon in (-180..180).step_by(GRID_STEP as usize) {
        for lat in (-90..=90).step_by(3) {
            points.extend(orthographic(f64::from(lat), f64::from(lon), center));
        }
    }
    points
}

/// One legend line per category, with point counts
pub fn legend_lines(model: &GlobeModel) -> Vec<TextLine<'static>> {
    EventCategory::ALL
        .iter()
        .map(|category| {
            let points = model
                .layer(*category)
                .map_or(0, |layer| layer.points.len());
            TextLine::from(vec![
                Span::styled("● ", Style::default().fg(category_color(*category))),
                Span::styled(
                    format!("{} ({})", category.code(), category.marker_color().as_str()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!(": {} - {points} points", category.label()),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect()
}
