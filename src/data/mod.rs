mod senegal;

use crate::map::{LineString, MapRenderer, OutlineKind};
use geojson::{GeoJson, Geometry, Value};
use thiserror::Error;

pub use senegal::{PROBABILITY_MATRIX, REGIONS};

/// Simplified Senegal outline (plus The Gambia enclave), compiled into the binary
const BASEMAP_GEOJSON: &str = include_str!("../../data/senegal_outline.geojson");

/// Feature name that marks the country itself; everything else is a neighbor
const COUNTRY_NAME: &str = "Senegal";

/// A named region with its centroid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Region {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DataStoreError {
    #[error("data store is empty: {regions} regions, {periods} time periods")]
    Empty { regions: usize, periods: usize },
    #[error("matrix has {rows} rows but there are {regions} regions")]
    RowCountMismatch { regions: usize, rows: usize },
    #[error("row for {region} has {found} time periods, expected {expected}")]
    RaggedRow {
        region: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("probability {value} for {region} at period {period} is outside [0, 1]")]
    ProbabilityOutOfRange {
        region: &'static str,
        period: usize,
        value: f64,
    },
    #[error("region {0} appears more than once")]
    DuplicateRegion(&'static str),
}

#[derive(Debug, Error)]
pub enum BasemapError {
    #[error("failed to parse embedded basemap: {0}")]
    Parse(#[from] geojson::Error),
    #[error("embedded basemap contains no country outline")]
    MissingCountry,
}

/// Read-only region table and probability matrix.
///
/// Holds only `'static` references, so copying a store never copies the data.
/// Dimensions and value ranges are checked once in [`DataStore::new`].
#[derive(Clone, Copy, Debug)]
pub struct DataStore {
    regions: &'static [Region],
    matrix: &'static [&'static [f64]],
}

impl DataStore {
    /// Validate and wrap a region table and its matrix (one row per region)
    pub fn new(
        regions: &'static [Region],
        matrix: &'static [&'static [f64]],
    ) -> Result<Self, DataStoreError> {
        let periods = matrix.first().map_or(0, |row| row.len());
        if regions.is_empty() || periods == 0 {
            return Err(DataStoreError::Empty {
                regions: regions.len(),
                periods,
            });
        }

        if matrix.len() != regions.len() {
            return Err(DataStoreError::RowCountMismatch {
                regions: regions.len(),
                rows: matrix.len(),
            });
        }

        for (i, region) in regions.iter().enumerate() {
            if regions[..i].iter().any(|r| r.name == region.name) {
                return Err(DataStoreError::DuplicateRegion(region.name));
            }
        }

        for (region, row) in regions.iter().zip(matrix) {
            if row.len() != periods {
                return Err(DataStoreError::RaggedRow {
                    region: region.name,
                    expected: periods,
                    found: row.len(),
                });
            }
            // NaN fails the range check too
            if let Some((t, &value)) = row
                .iter()
                .enumerate()
                .find(|(_, v)| !(0.0..=1.0).contains(*v))
            {
                return Err(DataStoreError::ProbabilityOutOfRange {
                    region: region.name,
                    period: t + 1,
                    value,
                });
            }
        }

        Ok(Self { regions, matrix })
    }

    /// The built-in Senegal dataset
    pub fn senegal() -> Result<Self, DataStoreError> {
        Self::new(REGIONS, PROBABILITY_MATRIX)
    }

    pub fn regions(&self) -> &'static [Region] {
        self.regions
    }

    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// Width of the matrix; never zero for a constructed store
    pub fn num_periods(&self) -> usize {
        self.matrix[0].len()
    }

    /// Raw probability for a region row and zero-based time index
    pub fn probability(&self, region_idx: usize, time_idx: usize) -> f64 {
        self.matrix[region_idx][time_idx]
    }
}

/// Parse the embedded basemap and hand its outlines to the renderer
pub fn load_basemap(renderer: &mut MapRenderer) -> Result<usize, BasemapError> {
    load_basemap_from(renderer, BASEMAP_GEOJSON)
}

fn load_basemap_from(renderer: &mut MapRenderer, source: &str) -> Result<usize, BasemapError> {
    let geojson: GeoJson = source.parse()?;
    let mut rings = 0;
    let mut country_rings = 0;

    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(geometry) => {
            process_geometry_rings(&geometry, &mut |line| {
                renderer.add_outline(line, OutlineKind::Country);
                rings += 1;
            });
            country_rings = rings;
            Vec::new()
        }
    };

    for feature in features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let kind = if name == COUNTRY_NAME {
            OutlineKind::Country
        } else {
            OutlineKind::Neighbor
        };

        if let Some(ref geometry) = feature.geometry {
            process_geometry_rings(geometry, &mut |line| {
                renderer.add_outline(line, kind);
                rings += 1;
                if kind == OutlineKind::Country {
                    country_rings += 1;
                }
            });
        }
    }

    if country_rings == 0 {
        return Err(BasemapError::MissingCountry);
    }
    Ok(rings)
}

/// Walk a geometry and emit every ring or line as a lon/lat linestring
fn process_geometry_rings<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    let to_line = |coords: &Vec<Vec<f64>>| -> LineString {
        coords.iter().map(|c| (c[0], c[1])).collect()
    };

    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => lines.iter().for_each(|l| add_line(to_line(l))),
        // Interior rings are drawn too: enclaves are real borders here
        Value::Polygon(rings) => rings.iter().for_each(|r| add_line(to_line(r))),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .for_each(|r| add_line(to_line(r))),
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_rings(g, add_line);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_REGIONS: &[Region] = &[Region::new("A", 14.0, -16.0), Region::new("B", 13.0, -15.0)];

    #[test]
    fn test_senegal_dimensions() {
        let store = DataStore::senegal().unwrap();
        assert_eq!(store.num_regions(), 14);
        assert_eq!(store.num_periods(), 30);
        assert_eq!(store.regions()[0].name, "Dakar");
        assert_eq!(store.probability(0, 0), 0.9845);
        assert_eq!(store.probability(13, 29), 0.8117);
    }

    #[test]
    fn test_row_count_mismatch() {
        const MATRIX: &[&[f64]] = &[&[0.1, 0.2]];
        let err = DataStore::new(TWO_REGIONS, MATRIX).unwrap_err();
        assert_eq!(err, DataStoreError::RowCountMismatch { regions: 2, rows: 1 });
    }

    #[test]
    fn test_ragged_row() {
        const MATRIX: &[&[f64]] = &[&[0.1, 0.2], &[0.3]];
        let err = DataStore::new(TWO_REGIONS, MATRIX).unwrap_err();
        assert_eq!(
            err,
            DataStoreError::RaggedRow {
                region: "B",
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.to_string(), "row for B has 1 time periods, expected 2");
    }

    #[test]
    fn test_out_of_range_probability() {
        const MATRIX: &[&[f64]] = &[&[0.1, 0.2], &[0.3, 1.5]];
        let err = DataStore::new(TWO_REGIONS, MATRIX).unwrap_err();
        assert!(matches!(
            err,
            DataStoreError::ProbabilityOutOfRange { region: "B", period: 2, .. }
        ));
    }

    #[test]
    fn test_nan_probability_rejected() {
        const MATRIX: &[&[f64]] = &[&[f64::NAN], &[0.3]];
        let err = DataStore::new(TWO_REGIONS, MATRIX).unwrap_err();
        assert!(matches!(
            err,
            DataStoreError::ProbabilityOutOfRange { region: "A", period: 1, .. }
        ));
    }

    #[test]
    fn test_duplicate_region() {
        const REGIONS: &[Region] = &[Region::new("A", 0.0, 0.0), Region::new("A", 1.0, 1.0)];
        const MATRIX: &[&[f64]] = &[&[0.1], &[0.2]];
        let err = DataStore::new(REGIONS, MATRIX).unwrap_err();
        assert_eq!(err, DataStoreError::DuplicateRegion("A"));
    }

    #[test]
    fn test_empty_store() {
        const MATRIX: &[&[f64]] = &[];
        let err = DataStore::new(&[], MATRIX).unwrap_err();
        assert_eq!(err, DataStoreError::Empty { regions: 0, periods: 0 });
    }

    #[test]
    fn test_load_embedded_basemap() {
        let mut renderer = MapRenderer::new();
        let rings = load_basemap(&mut renderer).unwrap();
        assert_eq!(rings, 2);
        assert!(renderer.has_data());
    }

    #[test]
    fn test_basemap_without_country() {
        let source = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"Elsewhere"},
             "geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}]}"#;
        let mut renderer = MapRenderer::new();
        let err = load_basemap_from(&mut renderer, source).unwrap_err();
        assert!(matches!(err, BasemapError::MissingCountry));
    }

    #[test]
    fn test_basemap_parse_error() {
        let mut renderer = MapRenderer::new();
        let err = load_basemap_from(&mut renderer, "not json").unwrap_err();
        assert!(matches!(err, BasemapError::Parse(_)));
    }
}
