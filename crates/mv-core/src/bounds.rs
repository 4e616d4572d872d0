//! Viewport bounds and metric range computation

use itertools::Either;
use serde::{Deserialize, Serialize};

use crate::feature::{Feature, LatLng};
use crate::result_set::ResultSet;
use crate::settings::MapSettings;

/// Fallback viewport when no valid features exist, so a map surface never
/// receives a degenerate box.
pub const WORLD_BOUNDS: Bounds = Bounds {
    south_west: LatLng::new(-90.0, -180.0),
    north_east: LatLng::new(90.0, 180.0),
};

/// An axis-aligned lat/lng box used to fit a map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Pad the north-east corner by the bin sizes, when present.
    ///
    /// Binned coordinates address a bin by its left/bottom edge; without
    /// this the right/top-most bins would be drawn outside the viewport.
    pub fn pad_for_bins(&mut self, bins: &BinSizes) {
        if let Some(width) = bins.width {
            self.north_east.lng += width;
        }
        if let Some(height) = bins.height {
            self.north_east.lat += height;
        }
    }
}

/// Minimal box covering every coordinate of every feature, or
/// [`WORLD_BOUNDS`] when there are none.
pub fn compute_bounds(features: &[Feature]) -> Bounds {
    let mut coords = features.iter().flat_map(feature_coords);
    let Some(first) = coords.next() else {
        return WORLD_BOUNDS;
    };
    let mut bounds = Bounds {
        south_west: first,
        north_east: first,
    };
    for coord in coords {
        bounds.extend(coord);
    }
    bounds
}

fn feature_coords(feature: &Feature) -> impl Iterator<Item = LatLng> + '_ {
    match feature {
        Feature::Polygon(poly) => Either::Left(poly.ring.iter().copied()),
        Feature::Point(point) => Either::Right(std::iter::once(point.position)),
    }
}

/// Metric min/max for choropleth-style color scaling.
///
/// `None` means "no scale" and must not be collapsed to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Min/max of the metric over point features only; polygons carry no
/// metric.
pub fn compute_range(features: &[Feature]) -> MetricRange {
    let mut range = MetricRange::default();
    for feature in features {
        let Feature::Point(point) = feature else {
            continue;
        };
        let Some(metric) = point.metric else {
            continue;
        };
        range.min = Some(range.min.map_or(metric, |min| min.min(metric)));
        range.max = Some(range.max.map_or(metric, |max| max.max(metric)));
    }
    range
}

/// Bin sizes resolved from the coordinate columns' binning metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinSizes {
    /// Longitude bin width, from the longitude column.
    pub width: Option<f64>,
    /// Latitude bin width, from the latitude column.
    pub height: Option<f64>,
}

/// Resolve bin sizes for the configured coordinate columns.
pub fn bin_sizes(result_set: &ResultSet, settings: &MapSettings) -> BinSizes {
    let bin_width_of = |name: Option<&str>| {
        name.and_then(|name| result_set.column_index(name))
            .and_then(|idx| result_set.columns[idx].binning_info)
            .map(|info| info.bin_width)
    };
    BinSizes {
        width: bin_width_of(settings.longitude_column.as_deref()),
        height: bin_width_of(settings.latitude_column.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{PointFeature, PolygonFeature};
    use crate::result_set::{BaseType, ColumnMeta};

    fn point(lat: f64, lng: f64, metric: Option<f64>) -> Feature {
        Feature::Point(PointFeature {
            position: LatLng::new(lat, lng),
            metric,
            source_row_index: 0,
        })
    }

    #[test]
    fn empty_features_fall_back_to_world_bounds() {
        let bounds = compute_bounds(&[]);
        assert_eq!(bounds.south_west, LatLng::new(-90.0, -180.0));
        assert_eq!(bounds.north_east, LatLng::new(90.0, 180.0));
    }

    #[test]
    fn bounds_cover_polygon_vertices_and_points() {
        let features = vec![
            Feature::Polygon(PolygonFeature {
                ring: vec![
                    LatLng::new(-5.0, 10.0),
                    LatLng::new(5.0, 20.0),
                    LatLng::new(0.0, 15.0),
                ],
                source_row_index: 0,
            }),
            point(7.0, -3.0, None),
        ];
        let bounds = compute_bounds(&features);
        assert_eq!(bounds.south_west, LatLng::new(-5.0, -3.0));
        assert_eq!(bounds.north_east, LatLng::new(7.0, 20.0));
    }

    #[test]
    fn bin_padding_extends_only_the_north_east_corner() {
        let mut bounds = compute_bounds(&[point(0.0, 0.0, None)]);
        let unadjusted = bounds;
        bounds.pad_for_bins(&BinSizes {
            width: Some(5.0),
            height: Some(2.0),
        });

        assert_eq!(bounds.south_west, unadjusted.south_west);
        assert_eq!(bounds.north_east.lat, unadjusted.north_east.lat + 2.0);
        assert_eq!(bounds.north_east.lng, unadjusted.north_east.lng + 5.0);
    }

    #[test]
    fn bin_sizes_come_from_the_coordinate_columns() {
        let rs = ResultSet::new(
            vec![
                ColumnMeta::new("lat", BaseType::Float).with_binning(2.0),
                ColumnMeta::new("lng", BaseType::Float).with_binning(5.0),
            ],
            vec![],
        );
        let settings = MapSettings {
            latitude_column: Some("lat".into()),
            longitude_column: Some("lng".into()),
            ..Default::default()
        };
        let bins = bin_sizes(&rs, &settings);
        assert_eq!(bins.width, Some(5.0));
        assert_eq!(bins.height, Some(2.0));
    }

    #[test]
    fn range_covers_point_metrics_only() {
        let features = vec![
            Feature::Polygon(PolygonFeature {
                ring: vec![LatLng::new(0.0, 0.0)],
                source_row_index: 0,
            }),
            point(0.0, 0.0, Some(3.0)),
            point(1.0, 1.0, Some(-1.0)),
            point(2.0, 2.0, None),
        ];
        let range = compute_range(&features);
        assert_eq!(range.min, Some(-1.0));
        assert_eq!(range.max, Some(3.0));
    }

    #[test]
    fn range_is_absent_without_point_metrics() {
        let range = compute_range(&[Feature::Polygon(PolygonFeature {
            ring: vec![LatLng::new(0.0, 0.0)],
            source_row_index: 0,
        })]);
        assert_eq!(range.min, None);
        assert_eq!(range.max, None);
    }
}
