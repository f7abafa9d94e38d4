use crate::braille::BrailleCanvas;
use crate::data::DataStore;
use crate::map::geometry::{disc_contains, disc_pixels, draw_line};
use crate::map::projection::{Viewport, INITIAL_ZOOM};
use crate::risk::{region_label, ColorTier, RiskSnapshot};

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Which basemap layer an outline belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineKind {
    Country,
    Neighbor,
}

/// Marker radius in Braille pixels at the initial zoom
const BASE_MARKER_RADIUS: f64 = 3.0;

/// Display settings for map layers
#[derive(Clone, Debug)]
pub struct DisplaySettings {
    pub show_neighbors: bool,
    pub show_labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_neighbors: true,
            show_labels: true,
        }
    }
}

/// A marker label in character coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub tier: ColorTier,
}

/// Rendered layers, back to front
pub struct MapLayers {
    pub country: BrailleCanvas,
    pub neighbors: BrailleCanvas,
    /// One canvas per tier, indexed by [`ColorTier::darkness`]
    pub markers: [BrailleCanvas; 5],
    pub labels: Vec<Label>,
}

/// Draws the basemap and region markers
pub struct MapRenderer {
    country: Vec<LineString>,
    neighbors: Vec<LineString>,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            country: Vec::new(),
            neighbors: Vec::new(),
            settings: DisplaySettings::default(),
        }
    }

    pub fn add_outline(&mut self, line: LineString, kind: OutlineKind) {
        match kind {
            OutlineKind::Country => self.country.push(line),
            OutlineKind::Neighbor => self.neighbors.push(line),
        }
    }

    /// Check if any outline is loaded
    pub fn has_data(&self) -> bool {
        !self.country.is_empty()
    }

    /// Markers grow with zoom so they stay readable when zoomed in
    pub fn marker_radius(viewport: &Viewport) -> i32 {
        (BASE_MARKER_RADIUS * (viewport.zoom / INITIAL_ZOOM).sqrt())
            .round()
            .clamp(1.0, 10.0) as i32
    }

    /// Render outlines and one marker per region onto fresh canvases
    pub fn render(
        &self,
        width: usize,
        height: usize,
        viewport: &Viewport,
        store: &DataStore,
        snapshot: &RiskSnapshot,
    ) -> MapLayers {
        let mut layers = MapLayers {
            country: BrailleCanvas::new(width, height),
            neighbors: BrailleCanvas::new(width, height),
            markers: std::array::from_fn(|_| BrailleCanvas::new(width, height)),
            labels: Vec::new(),
        };

        for line in &self.country {
            draw_linestring(&mut layers.country, line, viewport);
        }
        if self.settings.show_neighbors {
            for line in &self.neighbors {
                draw_linestring(&mut layers.neighbors, line, viewport);
            }
        }

        let radius = Self::marker_radius(viewport);
        let markers: Vec<Marker> = store
            .regions()
            .iter()
            .zip(snapshot.iter())
            .filter_map(|(region, (name, pct))| {
                let (px, py) = viewport.project(region.lon, region.lat);
                viewport.is_visible(px, py).then(|| Marker {
                    name,
                    pct,
                    tier: ColorTier::from_percentage(pct),
                    px,
                    py,
                })
            })
            .collect();

        let cols = layers.country.width();
        let rows = layers.country.height();
        let cell_of = |px: i32, py: i32| {
            (px >= 0 && py >= 0 && ((px / 2) as usize) < cols && ((py / 4) as usize) < rows)
                .then(|| (py / 4) as usize * cols + (px / 2) as usize)
        };

        // A centroid cell belongs to its own marker; neighbors' discs stay out
        let mut owner: Vec<Option<usize>> = vec![None; cols * rows];
        for (i, marker) in markers.iter().enumerate() {
            if let Some(cell) = cell_of(marker.px, marker.py) {
                if owner[cell].is_none() {
                    owner[cell] = Some(i);
                }
            }
        }
        for (i, marker) in markers.iter().enumerate() {
            let canvas = &mut layers.markers[marker.tier.darkness()];
            for (x, y) in disc_pixels(marker.px, marker.py, radius) {
                let foreign = cell_of(x, y).and_then(|cell| owner[cell]).is_some_and(|o| o != i);
                if !foreign {
                    canvas.set_pixel_signed(x, y);
                }
            }
        }

        if self.settings.show_labels {
            let mut occupied = vec![false; cols * rows];
            for canvas in &layers.markers {
                for (cx, cy, _) in canvas.glyphs() {
                    occupied[cy * cols + cx] = true;
                }
            }
            layers.labels = markers
                .iter()
                .filter_map(|marker| place_label(marker, radius, cols, rows, &mut occupied))
                .collect();
        }

        layers
    }

    /// Index of the region whose marker covers pixel `(px, py)`; the nearest
    /// centroid wins when markers overlap
    pub fn marker_at(
        &self,
        viewport: &Viewport,
        store: &DataStore,
        px: i32,
        py: i32,
    ) -> Option<usize> {
        // One pixel of slack: a Braille cell is coarse to aim at
        let radius = Self::marker_radius(viewport) + 1;
        store
            .regions()
            .iter()
            .enumerate()
            .filter_map(|(i, region)| {
                let (mx, my) = viewport.project(region.lon, region.lat);
                disc_contains(mx, my, radius, px, py)
                    .then(|| (i, (mx - px).pow(2) + (my - py).pow(2)))
            })
            .min_by_key(|&(_, dist2)| dist2)
            .map(|(i, _)| i)
    }

    pub fn toggle_labels(&mut self) {
        self.settings.show_labels = !self.settings.show_labels;
    }

    pub fn toggle_neighbors(&mut self) {
        self.settings.show_neighbors = !self.settings.show_neighbors;
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A region marker in canvas pixels
struct Marker {
    name: &'static str,
    pct: f64,
    tier: ColorTier,
    px: i32,
    py: i32,
}

/// Label to the right of the marker, else to the left; `None` when both
/// spots touch a marker or an earlier label
fn place_label(
    marker: &Marker,
    radius: i32,
    cols: usize,
    rows: usize,
    occupied: &mut [bool],
) -> Option<Label> {
    let row = marker.py.div_euclid(4);
    if row < 0 || row >= rows as i32 {
        return None;
    }
    let text = region_label(marker.name, marker.pct);
    let len = text.chars().count() as i32;
    let row_start = row as usize * cols;
    // Labels are cut at the right edge, so only the visible part must be free
    let span = |x: i32| (x as usize)..(x + len).min(cols as i32) as usize;

    let right = (marker.px + radius).div_euclid(2) + 1;
    let left = (marker.px - radius).div_euclid(2) - len;
    let x = [right, left].into_iter().find(|&x| {
        x >= 0 && x < cols as i32 && span(x).all(|c| !occupied[row_start + c])
    })?;

    for c in span(x) {
        occupied[row_start + c] = true;
    }
    Some(Label {
        x: x as u16,
        y: row as u16,
        text,
        tier: marker.tier,
    })
}

/// Draw a linestring with viewport culling
fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport) {
    for pair in line.windows(2) {
        let a = viewport.project(pair[0].0, pair[0].1);
        let b = viewport.project(pair[1].0, pair[1].1);
        if viewport.line_might_be_visible(a, b) {
            draw_line(canvas, a.0, a.1, b.0, b.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_basemap;
    use crate::risk::snapshot_at;

    fn setup() -> (MapRenderer, DataStore, Viewport) {
        let mut renderer = MapRenderer::new();
        load_basemap(&mut renderer).unwrap();
        (renderer, DataStore::senegal().unwrap(), Viewport::senegal(200, 120))
    }

    #[test]
    fn test_render_draws_every_region() {
        let (renderer, store, vp) = setup();
        let snapshot = snapshot_at(&store, 0);
        let layers = renderer.render(100, 30, &vp, &store, &snapshot);

        assert!(!layers.country.is_blank());
        assert!(layers.labels.iter().any(|l| l.text == "Diourbel: 36.5%"));
        for label in &layers.labels {
            let pct = snapshot.get(label.text.split(':').next().unwrap()).unwrap();
            assert_eq!(label.tier, ColorTier::from_percentage(pct));
        }
    }

    #[test]
    fn test_centroid_cells_show_own_tier_only() {
        let (renderer, store, vp) = setup();
        for t in 0..store.num_periods() {
            let snapshot = snapshot_at(&store, t);
            let layers = renderer.render(100, 30, &vp, &store, &snapshot);
            for (region, (name, pct)) in store.regions().iter().zip(snapshot.iter()) {
                let (px, py) = vp.project(region.lon, region.lat);
                let (cx, cy) = (px as usize / 2, py as usize / 4);
                let own = ColorTier::from_percentage(pct);
                for tier in ColorTier::ALL {
                    let drawn = layers.markers[tier.darkness()].cell(cx, cy).is_some();
                    assert_eq!(drawn, tier == own, "{name} in period {}", t + 1);
                }
            }
        }
    }

    #[test]
    fn test_labels_avoid_markers_and_each_other() {
        let (renderer, store, vp) = setup();
        for t in 0..store.num_periods() {
            let layers = renderer.render(100, 30, &vp, &store, &snapshot_at(&store, t));
            assert!(!layers.labels.is_empty());

            let mut taken: Vec<(usize, usize)> = layers
                .markers
                .iter()
                .flat_map(|canvas| canvas.glyphs().map(|(cx, cy, _)| (cx, cy)))
                .collect();
            for label in &layers.labels {
                let len = label.text.chars().count();
                let x = label.x as usize;
                for cx in x..(x + len).min(100) {
                    let cell = (cx, label.y as usize);
                    assert!(!taken.contains(&cell), "{} overlaps at {cell:?}", label.text);
                    taken.push(cell);
                }
            }
        }
    }

    #[test]
    fn test_markers_land_on_tier_canvas() {
        let (renderer, store, vp) = setup();
        // Period 1: Dakar 98.45% is in the darkest band, Fatick 5.65% in the lightest
        let layers = renderer.render(100, 30, &vp, &store, &snapshot_at(&store, 0));
        assert!(!layers.markers[ColorTier::High.darkness()].is_blank());
        assert!(!layers.markers[ColorTier::Low.darkness()].is_blank());
    }

    #[test]
    fn test_labels_toggle() {
        let (mut renderer, store, vp) = setup();
        renderer.toggle_labels();
        let layers = renderer.render(100, 30, &vp, &store, &snapshot_at(&store, 0));
        assert!(layers.labels.is_empty());
    }

    #[test]
    fn test_neighbors_toggle() {
        let (mut renderer, store, vp) = setup();
        renderer.toggle_neighbors();
        let layers = renderer.render(100, 30, &vp, &store, &snapshot_at(&store, 0));
        assert!(layers.neighbors.is_blank());
    }

    #[test]
    fn test_marker_hit_testing() {
        let (renderer, store, vp) = setup();
        let (kx, ky) = vp.project(-12.1750, 12.5600);
        let idx = renderer.marker_at(&vp, &store, kx + 1, ky).unwrap();
        assert_eq!(store.regions()[idx].name, "Kédougou");
        assert_eq!(renderer.marker_at(&vp, &store, 0, 0), None);
    }
}
