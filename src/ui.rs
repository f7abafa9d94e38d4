use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::data::DataStore;
use crate::map::MapLayers;
use crate::risk::{format_percent, ColorTier};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, Paragraph, Widget},
    Frame,
};

pub const TITLE: &str = "Senegal Malaria Risk Map";
pub const SUBTITLE: &str = "Color-coded regional malaria probability visualization over time";

const HEADER_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 32;
const RIGHT_PANEL_WIDTH: u16 = 28;
/// Region names are padded to this many columns in the sidebar
const NAME_WIDTH: usize = 13;

/// Screen regions of the whole view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLayout {
    pub header: Rect,
    pub control: Rect,
    /// The one-row slider track inside the control block
    pub slider: Rect,
    pub viewing: Rect,
    pub regions: Rect,
    pub map: Rect,
    /// Map canvas inside its border
    pub map_inner: Rect,
    pub legend: Rect,
    pub summary: Rect,
    pub status: Rect,
}

/// Split the terminal: header, then sidebar | map | stats, then status bar
pub fn layout(area: Rect) -> ViewLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(10),
            Constraint::Length(RIGHT_PANEL_WIDTH),
        ])
        .split(rows[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Slider, tick labels, key hints
            Constraint::Length(3), // Currently viewing
            Constraint::Min(3),    // Region list
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ColorTier::ALL.len() as u16 + 2),
            Constraint::Length(12),
            Constraint::Min(1),
        ])
        .split(columns[2]);

    let control_inner = bordered().inner(sidebar[0]);
    let slider = Rect {
        height: control_inner.height.min(1),
        ..control_inner
    };

    ViewLayout {
        header: rows[0],
        control: sidebar[0],
        slider,
        viewing: sidebar[1],
        regions: sidebar[2],
        map: columns[1],
        map_inner: bordered().inner(columns[1]),
        legend: right[0],
        summary: right[1],
        status: rows[2],
    }
}

fn bordered() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn titled(title: String) -> Block<'static> {
    bordered().title(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

/// `Data: 14 regions × 30 time periods`
pub fn caption(store: &DataStore) -> String {
    format!(
        "Data: {} regions × {} time periods",
        store.num_regions(),
        store.num_periods()
    )
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let view = layout(frame.area());

    render_header(frame, view.header);
    render_time_control(frame, app, &view);
    render_region_list(frame, app, view.regions);
    render_map(frame, app, &view);
    render_legend(frame, view.legend);
    render_summary(frame, app, view.summary);
    render_status_bar(frame, app, view.status);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {TITLE}"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {SUBTITLE}"),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(header, area);
}

fn render_time_control(frame: &mut Frame, app: &App, view: &ViewLayout) {
    let period = app.period();
    let block = titled(" Time Period Selection ".to_string());
    let inner = block.inner(view.control);
    frame.render_widget(block, view.control);

    let gauge = LineGauge::default()
        .ratio(period.ratio())
        .label(Span::styled(
            format!("Month {:>2} ", period.get()),
            Style::default().fg(Color::Yellow),
        ))
        .line_set(symbols::line::THICK)
        .filled_style(Style::default().fg(Color::Cyan))
        .unfilled_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(gauge, view.slider);

    // Range ends under the track, then key hints
    let max = period.max().to_string();
    let pad = (inner.width as usize).saturating_sub(1 + max.len());
    let rest = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("1{}{max}", " ".repeat(pad)),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "←/→ [ ] Home End",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    let rest_area = Rect {
        y: inner.y + view.slider.height,
        height: inner.height.saturating_sub(view.slider.height),
        ..inner
    };
    frame.render_widget(rest, rest_area);

    let viewing = Paragraph::new(Line::from(vec![
        Span::styled("Month ", Style::default().fg(Color::White)),
        Span::styled(
            period.get().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(titled(" Currently Viewing ".to_string()));
    frame.render_widget(viewing, view.viewing);
}

/// Sidebar rows: every region alphabetically, on its tier color
fn render_region_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .snapshot()
        .sorted_by_name()
        .into_iter()
        .map(|(name, pct)| {
            let tier = ColorTier::from_percentage(pct);
            ListItem::new(Line::from(Span::styled(
                format!(" {name:<NAME_WIDTH$}{:>7} ", format_percent(pct)),
                Style::default().bg(tier.color()).fg(Color::Black),
            )))
        })
        .collect();

    let list = List::new(items).block(titled(" Regional Probabilities ".to_string()));
    frame.render_widget(list, area);
}

fn render_map(frame: &mut Frame, app: &App, view: &ViewLayout) {
    let block = titled(format!(" Malaria Risk Map - Month {} ", app.period().get()))
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} ", caption(&app.store)),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );
    frame.render_widget(block, view.map);

    let inner = view.map_inner;
    let layers = app.map_renderer.render(
        inner.width as usize,
        inner.height as usize,
        &app.viewport,
        &app.store,
        app.snapshot(),
    );
    frame.render_widget(MapWidget { layers }, inner);

    if let Some((name, pct)) = app.popup() {
        render_popup(frame, inner, name, pct);
    }
}

/// Pinned marker details in the map's top-left corner
fn render_popup(frame: &mut Frame, map: Rect, name: &str, pct: f64) {
    let body = format!("Malaria Risk: {}", format_percent(pct));
    let width = (body.chars().count().max(name.chars().count()) as u16 + 4).min(map.width);
    let area = Rect {
        width,
        height: 4.min(map.height),
        ..map
    };

    let tier = ColorTier::from_percentage(pct);
    let popup = Paragraph::new(vec![
        Line::from(Span::styled(
            name.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(body, Style::default().fg(tier.color()))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(tier.color())),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Custom widget that renders the Braille map with marker labels overlaid
struct MapWidget {
    layers: MapLayers,
}

impl MapWidget {
    /// Render a Braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (cx, cy, ch) in canvas.glyphs() {
            if cx >= area.width as usize || cy >= area.height as usize {
                continue;
            }
            let (x, y) = (area.x + cx as u16, area.y + cy as u16);
            buf[(x, y)].set_char(ch).set_fg(color);
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: neighbors, country outline, markers lightest to darkest
        Self::render_layer(&self.layers.neighbors, Color::DarkGray, area, buf);
        Self::render_layer(&self.layers.country, Color::Gray, area, buf);
        for tier in ColorTier::ALL {
            Self::render_layer(&self.layers.markers[tier.darkness()], tier.color(), area, buf);
        }

        for label in &self.layers.labels {
            if label.y >= area.height || label.x >= area.width {
                continue;
            }
            let (x, y) = (area.x + label.x, area.y + label.y);
            let max_len = (area.width - label.x) as usize;
            let style = Style::default().fg(label.tier.color());

            for (i, ch) in label.text.chars().take(max_len).enumerate() {
                buf[(x + i as u16, y)].set_char(ch).set_style(style);
            }
        }
    }
}

fn render_legend(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = ColorTier::ALL
        .iter()
        .rev()
        .map(|tier| {
            Line::from(vec![
                Span::styled("██ ", Style::default().fg(tier.color())),
                Span::styled(tier.label(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let legend = Paragraph::new(lines).block(titled(" Risk Legend ".to_string()));
    frame.render_widget(legend, area);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let heading = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let lines = match app.summary() {
        Some(summary) => {
            let metric = |label: &'static str, region: Option<&'static str>, pct: f64| {
                let mut lines = vec![Line::from(Span::styled(label, heading))];
                if let Some(region) = region {
                    lines.push(Line::from(Span::styled(format!("  {region}"), value)));
                }
                lines.push(Line::from(Span::styled(
                    format!("  {}", format_percent(pct)),
                    Style::default().fg(ColorTier::from_percentage(pct).color()),
                )));
                lines
            };

            let mut lines = metric("Average Risk", None, summary.average);
            lines.push(Line::default());
            lines.extend(metric("Highest Risk", Some(summary.highest.0), summary.highest.1));
            lines.push(Line::default());
            lines.extend(metric("Lowest Risk", Some(summary.lowest.0), summary.lowest.1));
            lines
        }
        None => vec![Line::from(Span::styled("No regions", heading))],
    };

    let summary = Paragraph::new(lines).block(titled(" Summary Statistics ".to_string()));
    frame.render_widget(summary, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(" Month: ", dim),
        Span::styled(
            format!("{}/{}", app.period().get(), app.period().max()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(" Zoom: ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Magenta)),
        Span::styled(" | ", dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(tooltip) = app.hover_text() {
        spans.push(Span::styled(" | ", dim));
        spans.push(Span::styled(tooltip, Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(
        " | ←/→:month hjkl:pan +/-:zoom L:labels b:borders r:reset q:quit",
        dim,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Period;
    use crate::data::load_basemap;
    use ratatui::{backend::TestBackend, Terminal};

    const WIDTH: u16 = 120;
    const HEIGHT: u16 = 40;

    fn app() -> App {
        let store = DataStore::senegal().unwrap();
        let mut app = App::new(store, Period::first(store.num_periods()), WIDTH, HEIGHT);
        load_basemap(&mut app.map_renderer).unwrap();
        app
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Text of one buffer row inside `area`
    fn row_text(buf: &Buffer, area: Rect, row: u16) -> String {
        (area.x..area.right())
            .map(|x| buf[(x, area.y + row)].symbol().to_string())
            .collect()
    }

    fn buffer_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, buf.area, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_layout_fits_terminal() {
        let view = layout(Rect::new(0, 0, WIDTH, HEIGHT));
        assert_eq!(view.slider.height, 1);
        assert!(view.control.contains(view.slider.as_position()));
        assert_eq!(view.map_inner.width, WIDTH - SIDEBAR_WIDTH - RIGHT_PANEL_WIDTH - 2);
        assert_eq!(view.status.y, HEIGHT - 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut app = app();
        let first = draw(&app);
        app.set_period(2);
        let second = draw(&app);
        app.set_period(1);
        let third = draw(&app);

        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_sidebar_is_alphabetical() {
        let app = app();
        let buf = draw(&app);
        let view = layout(buf.area);
        let inner = bordered().inner(view.regions);

        let names: Vec<String> = (0..app.store.num_regions() as u16)
            .map(|row| {
                row_text(&buf, inner, row)
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.first().map(String::as_str), Some("Dakar"));
        assert_eq!(names.last().map(String::as_str), Some("Ziguinchor"));
    }

    #[test]
    fn test_sidebar_rows_use_tier_colors() {
        let app = app();
        let buf = draw(&app);
        let inner = bordered().inner(layout(buf.area).regions);

        // Dakar is first alphabetically; 98.45% is in the darkest band
        assert_eq!(buf[(inner.x, inner.y)].bg, ColorTier::High.color());
        assert!(row_text(&buf, inner, 0).contains("Dakar"));
    }

    #[test]
    fn test_view_shows_titles_stats_and_caption() {
        let mut app = app();
        app.set_period(5);
        let text = buffer_text(&draw(&app));

        assert!(text.contains(TITLE));
        assert!(text.contains("Malaria Risk Map - Month 5"));
        assert!(text.contains("Month  5"));
        assert!(text.contains("Average Risk"));
        assert!(text.contains("Highest Risk"));
        assert!(text.contains("Lowest Risk"));
        assert!(text.contains("High Risk (80-100%)"));
        assert!(text.contains("Data: 14 regions × 30 time periods"));

        let summary = app.summary().unwrap();
        assert!(text.contains(summary.highest.0));
        assert!(text.contains(&format_percent(summary.average)));
    }

    #[test]
    fn test_marker_centroids_keep_tier_color() {
        let mut app = app();
        let area = app.map_area();
        for period in 1..=app.store.num_periods() {
            app.set_period(period);
            let buf = draw(&app);
            for (region, (name, pct)) in app.store.regions().iter().zip(app.snapshot().iter()) {
                let (px, py) = app.viewport.project(region.lon, region.lat);
                let cell = &buf[(area.x + (px / 2) as u16, area.y + (py / 4) as u16)];
                assert_eq!(
                    cell.fg,
                    ColorTier::from_percentage(pct).color(),
                    "{name} hidden in period {period}"
                );
            }
        }
    }

    #[test]
    fn test_popup_rendered_for_selected_marker() {
        let mut app = app();
        let region = app.store.regions()[5];
        let (px, py) = app.viewport.project(region.lon, region.lat);
        let area = app.map_area();
        app.click(area.x + (px / 2) as u16, area.y + (py / 4) as u16);

        let text = buffer_text(&draw(&app));
        assert!(text.contains("Malaria Risk:"));
    }
}
