use std::f64::consts::PI;

/// Map center (lon, lat): the middle of Senegal
pub const MAP_CENTER: (f64, f64) = (-14.4524, 14.4974);

/// Initial zoom; frames the whole country in a typical terminal pane
pub const INITIAL_ZOOM: f64 = 40.0;

const MIN_ZOOM: f64 = 5.0;
const MAX_ZOOM: f64 = 400.0;
const ZOOM_STEP: f64 = 1.5;

/// Web Mercator in normalized [0, 1] coordinates
fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0;
    let lat_rad = lat * PI / 180.0;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

fn inverse_mercator(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan() * 180.0 / PI;
    (lon, lat)
}

/// Visible map area: a center, a zoom, and the pixel size of the canvas
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub center_lon: f64,
    pub center_lat: f64,
    /// Pixels per normalized world width, as a multiple of `width`
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Fixed initial view over Senegal
    pub fn senegal(width: usize, height: usize) -> Self {
        Self::new(MAP_CENTER.0, MAP_CENTER.1, INITIAL_ZOOM, width, height)
    }

    /// Zoom relative to the initial view
    pub fn relative_zoom(&self) -> f64 {
        self.zoom / INITIAL_ZOOM
    }

    fn scale(&self) -> f64 {
        self.zoom * self.width.max(1) as f64
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let deg_per_px = 360.0 / self.scale();
        self.center_lon = (self.center_lon + dx as f64 * deg_per_px).clamp(-180.0, 180.0);
        // Latitude degrees shrink toward the poles; cos keeps pan speed even on screen
        let lat_step = deg_per_px * self.center_lat.to_radians().cos();
        self.center_lat = (self.center_lat - dy as f64 * lat_step).clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Zoom in keeping the point under `(px, py)` fixed
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, ZOOM_STEP);
    }

    /// Zoom out keeping the point under `(px, py)` fixed
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / ZOOM_STEP);
    }

    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let (cx, cy) = mercator(self.center_lon, self.center_lat);
        let off_x = px as f64 - self.width as f64 / 2.0;
        let off_y = py as f64 - self.height as f64 / 2.0;
        let anchor = (off_x / self.scale() + cx, off_y / self.scale() + cy);

        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        // Move the center so the anchor stays under the cursor
        let scale = self.scale();
        let (lon, lat) = inverse_mercator(anchor.0 - off_x / scale, anchor.1 - off_y / scale);
        self.center_lon = lon;
        self.center_lat = lat.clamp(-85.0, 85.0);
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let (x, y) = mercator(lon, lat);
        let (cx, cy) = mercator(self.center_lon, self.center_lat);
        let scale = self.scale();

        let px = ((x - cx) * scale + self.width as f64 / 2.0).round() as i32;
        let py = ((y - cy) * scale + self.height as f64 / 2.0).round() as i32;
        (px, py)
    }

    /// Check if a projected point is on the canvas, with a small margin
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10 && px < self.width as i32 + 10 && py >= -10 && py < self.height as i32 + 10
    }

    /// Rough bounding box check for a line segment
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        p1.0.max(p2.0) >= 0
            && p1.0.min(p2.0) < self.width as i32
            && p1.1.max(p2.1) >= 0
            && p1.1.min(p2.1) < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_projects_to_middle() {
        let vp = Viewport::senegal(200, 120);
        assert_eq!(vp.project(MAP_CENTER.0, MAP_CENTER.1), (100, 60));
    }

    #[test]
    fn test_country_fits_initial_view() {
        let vp = Viewport::senegal(200, 120);
        for (lon, lat) in [(-17.53, 14.75), (-11.40, 12.50), (-15.0, 16.65), (-16.72, 12.33)] {
            let (px, py) = vp.project(lon, lat);
            assert!(px >= 0 && px < 200 && py >= 0 && py < 120, "{lon},{lat} -> {px},{py}");
        }
    }

    #[test]
    fn test_pan() {
        let mut vp = Viewport::senegal(200, 120);
        vp.pan(10, 0);
        assert!(vp.center_lon > MAP_CENTER.0);
        vp.pan(0, 10);
        assert!(vp.center_lat < MAP_CENTER.1);
    }

    #[test]
    fn test_zoom_limits() {
        let mut vp = Viewport::senegal(200, 120);
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom, MAX_ZOOM);
        for _ in 0..50 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut vp = Viewport::senegal(200, 120);
        // Dakar sits well off center
        let (lon, lat) = (-17.4677, 14.7167);
        let (ax, ay) = vp.project(lon, lat);
        vp.zoom_in_at(ax, ay);
        let (px, py) = vp.project(lon, lat);
        // The anchor is a whole pixel, so the point may drift by one after rounding
        assert!((px - ax).abs() <= 1 && (py - ay).abs() <= 1, "{ax},{ay} -> {px},{py}");
        assert!(vp.zoom > INITIAL_ZOOM);
    }
}
