//! Map surface capability trait and the renderer's explicit state

use serde::{Deserialize, Serialize};

use mv_core::LatLng;

use crate::style::{MarkerStyle, PolygonStyle};

/// Opaque identifier for a shape drawn on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// Capability interface for a drawing surface the renderer targets.
///
/// The surface is mutated exclusively by the renderer; interaction code
/// only reads the handles the renderer returns.
pub trait MapSurface {
    fn add_polygon(&mut self, ring: &[LatLng], style: &PolygonStyle) -> ShapeId;
    fn add_marker(&mut self, at: LatLng, style: &MarkerStyle) -> ShapeId;
    fn remove_shape(&mut self, id: ShapeId);
}

/// A drawn shape tagged with its originating row index, so a UI event on
/// the shape can be mapped back to the row without re-querying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerHandle {
    pub shape: ShapeId,
    pub source_row_index: usize,
}

/// The set of layers currently on the surface.
///
/// Owned and returned explicitly by the renderer so layer lifetime is
/// visible at the call site rather than hidden in instance fields.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub active_layers: Vec<LayerHandle>,
}
