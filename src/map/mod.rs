mod geometry;
mod projection;
mod renderer;

pub use projection::{Viewport, INITIAL_ZOOM, MAP_CENTER};
pub use renderer::{Label, LineString, MapLayers, MapRenderer, OutlineKind};
