//! Geometry extraction from result rows
//!
//! Turns a result set plus column-selection settings into normalized
//! features. Extraction never fails as a whole: malformed geometry skips
//! the offending row, missing columns yield zero features, and null
//! coordinates are filtered and surfaced as a single aggregate warning.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::feature::{Feature, LatLng, PointFeature, PolygonFeature};
use crate::result_set::ResultSet;
use crate::settings::{MapSettings, MapType};

/// Output of [`extract`]: the features plus user-visible warnings.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub features: Vec<Feature>,
    pub warnings: Vec<String>,
}

/// Why a single polygon cell could not be parsed. Never escapes
/// [`extract`]; the row is skipped and the error logged.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid JSON ring list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid WKT polygon: {0}")]
    Wkt(String),
    #[error("unsupported geometry value type")]
    Unsupported,
}

/// Extract polygon and point features from `result_set` as selected by
/// `settings`.
///
/// Polygon and point extraction run independently: each is active only
/// when its column setting resolves to an actual column. Every feature
/// carries the pre-filter index of the row it came from.
pub fn extract(result_set: &ResultSet, settings: &MapSettings) -> Extraction {
    let mut features = Vec::new();
    let mut warnings = Vec::new();

    if let Some(polygon_idx) = settings
        .polygon_column
        .as_deref()
        .and_then(|name| result_set.column_index(name))
    {
        for (row_index, row) in result_set.rows.iter().enumerate() {
            let cell = match row.get(polygon_idx) {
                Some(cell) if !cell.is_null() => cell,
                _ => continue,
            };
            match parse_polygon_cell(cell) {
                Ok(rings) => {
                    for ring in rings {
                        features.push(Feature::Polygon(PolygonFeature {
                            ring,
                            source_row_index: row_index,
                        }));
                    }
                }
                Err(err) => {
                    debug!(row = row_index, error = %err, "skipping row with malformed polygon geometry");
                }
            }
        }
    }

    let lat_idx = settings
        .latitude_column
        .as_deref()
        .and_then(|name| result_set.column_index(name));
    let lng_idx = settings
        .longitude_column
        .as_deref()
        .and_then(|name| result_set.column_index(name));

    if let (Some(lat_idx), Some(lng_idx)) = (lat_idx, lng_idx) {
        let metric_idx = settings
            .metric_column
            .as_deref()
            .and_then(|name| result_set.column_index(name));

        let mut filtered = 0usize;
        for (row_index, row) in result_set.rows.iter().enumerate() {
            let lat = row.get(lat_idx).and_then(Value::as_f64);
            let lng = row.get(lng_idx).and_then(Value::as_f64);
            let metric = metric_idx
                .and_then(|idx| row.get(idx))
                .and_then(Value::as_f64);

            let valid = match settings.map_type {
                MapType::Pin => lat.is_some() && lng.is_some(),
                MapType::Heat | MapType::Region => {
                    lat.is_some() && lng.is_some() && metric.is_some()
                }
            };

            match (valid, lat, lng) {
                (true, Some(lat), Some(lng)) => features.push(Feature::Point(PointFeature {
                    position: LatLng::new(lat, lng),
                    metric,
                    source_row_index: row_index,
                })),
                _ => filtered += 1,
            }
        }

        if filtered > 0 {
            warnings.push(format!(
                "We filtered out {filtered} row(s) containing null values."
            ));
        }
    }

    Extraction { features, warnings }
}

/// Parse one polygon cell into its rings, coordinates already swapped to
/// `(lat, lng)`.
///
/// Two encodings are accepted: a JSON array of rings (either a JSON array
/// cell or its string form), each ring `[[lng, lat], ...]`, and the WKT
/// subset `POLYGON ((lng lat, lng lat, ...))` with a single outer ring.
fn parse_polygon_cell(cell: &Value) -> Result<Vec<Vec<LatLng>>, GeometryError> {
    match cell {
        Value::Array(_) => rings_from_json(cell.clone()),
        Value::String(text) => {
            let text = text.trim();
            if text.starts_with("POLYGON") {
                Ok(vec![parse_wkt_ring(text)?])
            } else {
                rings_from_json(serde_json::from_str(text)?)
            }
        }
        _ => Err(GeometryError::Unsupported),
    }
}

fn rings_from_json(value: Value) -> Result<Vec<Vec<LatLng>>, GeometryError> {
    let rings: Vec<Vec<[f64; 2]>> = serde_json::from_value(value)?;
    Ok(rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .map(|[lng, lat]| LatLng::new(lat, lng))
                .collect()
        })
        .collect())
}

fn parse_wkt_ring(text: &str) -> Result<Vec<LatLng>, GeometryError> {
    let inner = text
        .strip_prefix("POLYGON ((")
        .and_then(|rest| rest.strip_suffix("))"))
        .ok_or_else(|| GeometryError::Wkt("expected POLYGON ((...)) wrapper".into()))?;

    inner
        .split(',')
        .map(|pair| {
            let mut parts = pair.split_whitespace();
            let lng = parts
                .next()
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| GeometryError::Wkt(format!("bad coordinate pair {pair:?}")))?;
            let lat = parts
                .next()
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| GeometryError::Wkt(format!("bad coordinate pair {pair:?}")))?;
            Ok(LatLng::new(lat, lng))
        })
        .collect()
}
