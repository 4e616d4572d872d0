//! Core data model for the map visualization pipeline
//!
//! This crate defines the tabular result-set model, the visualization
//! settings, and the pure transformations over them: geometry extraction
//! and bounds/range computation. It has no UI dependencies.

pub mod bounds;
pub mod extract;
pub mod feature;
pub mod result_set;
pub mod settings;

// Re-export commonly used types
pub use bounds::{bin_sizes, compute_bounds, compute_range, BinSizes, Bounds, MetricRange, WORLD_BOUNDS};
pub use extract::{extract, Extraction, GeometryError};
pub use feature::{Feature, LatLng, PointFeature, PolygonFeature};
pub use result_set::{BaseType, BinningInfo, ColumnMeta, ResultSet, Row, SemanticType};
pub use settings::{MapSettings, MapType};
