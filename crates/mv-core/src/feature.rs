//! Normalized geometric features derived from result rows

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, in that order.
///
/// Wire formats deliver coordinates as `(lng, lat)`; extraction swaps them
/// on ingestion and everything downstream uses this named pair so the
/// order can never be confused again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A geometric shape derived from one result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Feature {
    Polygon(PolygonFeature),
    Point(PointFeature),
}

impl Feature {
    /// Position of the originating row in the pre-filter row sequence.
    ///
    /// A lookup key back into `ResultSet::rows`, never an owning copy.
    pub fn source_row_index(&self) -> usize {
        match self {
            Feature::Polygon(p) => p.source_row_index,
            Feature::Point(p) => p.source_row_index,
        }
    }
}

/// A single closed ring. Multi-ring cells yield one feature per ring,
/// all sharing the same source row index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonFeature {
    pub ring: Vec<LatLng>,
    pub source_row_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    pub position: LatLng,
    /// Metric value for color scaling; absent in pin mode.
    pub metric: Option<f64>,
    pub source_row_index: usize,
}
