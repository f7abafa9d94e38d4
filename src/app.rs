use crate::data::DataStore;
use crate::map::{MapRenderer, Viewport};
use crate::risk::{region_label, snapshot_at, RiskSnapshot, Summary};
use crate::ui::{self, ViewLayout};
use ratatui::layout::{Position, Rect};
use tracing::{debug, warn};

/// Selected time period, 1-based and always within `[1, max]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    value: usize,
    max: usize,
}

impl Period {
    /// `None` if `value` is outside `[1, max]`
    pub fn new(value: usize, max: usize) -> Option<Self> {
        (1..=max).contains(&value).then_some(Self { value, max })
    }

    /// Period 1 of `max` (`max` is at least 1 for any valid store)
    pub fn first(max: usize) -> Self {
        Self {
            value: 1,
            max: max.max(1),
        }
    }

    /// Pin `value` into `[1, max]`
    pub fn clamped(value: usize, max: usize) -> Self {
        let max = max.max(1);
        Self {
            value: value.clamp(1, max),
            max,
        }
    }

    pub fn get(self) -> usize {
        self.value
    }

    pub fn max(self) -> usize {
        self.max
    }

    /// Zero-based column in the probability matrix
    pub fn index(self) -> usize {
        self.value - 1
    }

    /// Move by `delta` periods, stopping at either end
    pub fn step(self, delta: isize) -> Self {
        let value = self.value.saturating_add_signed(delta);
        Self::clamped(value, self.max)
    }

    /// Position along the slider, 0.0 at period 1 and 1.0 at the last
    pub fn ratio(self) -> f64 {
        if self.max <= 1 {
            return 0.0;
        }
        (self.value - 1) as f64 / (self.max - 1) as f64
    }
}

/// What a held left button is dragging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drag {
    /// Panning the map; last cursor cell
    Map(u16, u16),
    Slider,
}

/// Application state
pub struct App {
    pub store: DataStore,
    period: Period,
    snapshot: RiskSnapshot,
    summary: Option<Summary>,
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    pub should_quit: bool,
    /// Screen regions for the current terminal size
    layout: ViewLayout,
    drag: Option<Drag>,
    /// Region under the mouse cursor
    hovered: Option<usize>,
    /// Region whose popup is pinned
    selected: Option<usize>,
}

impl App {
    pub fn new(store: DataStore, period: Period, width: u16, height: u16) -> Self {
        let layout = ui::layout(Rect::new(0, 0, width, height));
        let map_area = layout.map_inner;
        let snapshot = snapshot_at(&store, period.index());
        let summary = Summary::of(&snapshot);

        Self {
            store,
            period,
            snapshot,
            summary,
            viewport: Viewport::senegal(
                map_area.width as usize * 2,
                map_area.height as usize * 4,
            ),
            map_renderer: MapRenderer::new(),
            should_quit: false,
            layout,
            drag: None,
            hovered: None,
            selected: None,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn snapshot(&self) -> &RiskSnapshot {
        &self.snapshot
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn map_area(&self) -> Rect {
        self.layout.map_inner
    }

    /// Control change handler: clamp, then recompute everything derived from
    /// the period
    pub fn set_period(&mut self, value: usize) {
        let period = Period::clamped(value, self.store.num_periods());
        if period.get() != value {
            warn!(requested = value, clamped = period.get(), "time period out of range");
        }
        if period == self.period {
            return;
        }

        self.period = period;
        self.snapshot = snapshot_at(&self.store, period.index());
        self.summary = Summary::of(&self.snapshot);
        debug!(period = period.get(), "recomputed risk snapshot");
    }

    pub fn step_period(&mut self, delta: isize) {
        self.set_period(self.period.step(delta).get());
    }

    pub fn first_period(&mut self) {
        self.set_period(1);
    }

    pub fn last_period(&mut self) {
        self.set_period(self.period.max());
    }

    /// Update layout when the terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = ui::layout(Rect::new(0, 0, width, height));
        self.viewport.width = self.layout.map_inner.width as usize * 2;
        self.viewport.height = self.layout.map_inner.height as usize * 4;
    }

    /// Back to the initial map view; the period is left alone
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::senegal(self.viewport.width, self.viewport.height);
        self.selected = None;
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Terminal cell to Braille pixel inside the map, if the cell is on the map
    fn to_map_pixel(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let area = self.layout.map_inner;
        if !area.contains(Position::new(col, row)) {
            return None;
        }
        // Aim at the middle of the 2x4 dot cell
        let px = (col - area.x) as i32 * 2 + 1;
        let py = (row - area.y) as i32 * 4 + 2;
        Some((px, py))
    }

    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.to_map_pixel(col, row) {
            self.viewport.zoom_in_at(px, py);
        }
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.to_map_pixel(col, row) {
            self.viewport.zoom_out_at(px, py);
        }
    }

    /// Region index whose marker is under the terminal cell
    pub fn region_at(&self, col: u16, row: u16) -> Option<usize> {
        let (px, py) = self.to_map_pixel(col, row)?;
        self.map_renderer.marker_at(&self.viewport, &self.store, px, py)
    }

    /// Track the cursor for hover tooltips
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.hovered = self.region_at(col, row);
    }

    /// Left button pressed: the slider sets the period, a marker pins its
    /// popup, anything else on the map starts a drag
    pub fn click(&mut self, col: u16, row: u16) {
        if let Some(period) = self.slider_period_at(col, row) {
            self.drag = Some(Drag::Slider);
            self.set_period(period);
            return;
        }

        match self.region_at(col, row) {
            Some(idx) => {
                self.selected = Some(idx);
                debug!(region = self.store.regions()[idx].name, "pinned region popup");
            }
            None => {
                self.selected = None;
                if self.layout.map_inner.contains(Position::new(col, row)) {
                    self.drag = Some(Drag::Map(col, row));
                }
            }
        }
    }

    /// Pan the map or scrub the slider, depending on where the drag began
    pub fn handle_drag(&mut self, col: u16, row: u16) {
        match self.drag {
            Some(Drag::Map(last_col, last_row)) => {
                let dx = last_col as i32 - col as i32;
                let dy = last_row as i32 - row as i32;
                // Braille pixels per terminal cell
                self.pan(dx * 2, dy * 4);
                self.drag = Some(Drag::Map(col, row));
            }
            Some(Drag::Slider) => {
                // Keep scrubbing even if the cursor drifts off the track row
                let track = self.layout.slider;
                // The terminal may have shrunk mid-drag
                if track.width == 0 {
                    return;
                }
                let col = col.clamp(track.x, track.right().saturating_sub(1));
                if let Some(period) = self.slider_period_at(col, track.y) {
                    self.set_period(period);
                }
            }
            None => {}
        }
    }

    /// Reset drag state when mouse button released
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Period under a click on the slider track, if the click hit it
    fn slider_period_at(&self, col: u16, row: u16) -> Option<usize> {
        let track = self.layout.slider;
        if !track.contains(Position::new(col, row)) {
            return None;
        }
        let max = self.period.max();
        if track.width <= 1 || max <= 1 {
            return Some(1);
        }
        let ratio = (col - track.x) as f64 / (track.width - 1) as f64;
        Some(1 + (ratio * (max - 1) as f64).round() as usize)
    }

    /// Tooltip for the hovered marker, e.g. `Dakar: 98.5%`
    pub fn hover_text(&self) -> Option<String> {
        self.hovered.map(|idx| self.region_text(idx))
    }

    /// Pinned popup as (region name, risk percentage)
    pub fn popup(&self) -> Option<(&'static str, f64)> {
        let idx = self.selected?;
        let name = self.store.regions()[idx].name;
        self.snapshot.at(idx).map(|pct| (name, pct))
    }

    fn region_text(&self, idx: usize) -> String {
        let name = self.store.regions()[idx].name;
        region_label(name, self.snapshot.at(idx).unwrap_or_default())
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Zoom relative to the initial view, e.g. `1.5x`
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.relative_zoom())
    }

    /// Current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.2}°{}, {:.2}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}
