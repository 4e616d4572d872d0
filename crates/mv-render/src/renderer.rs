//! Layer renderer: full teardown and redraw on every update

use tracing::trace;

use mv_core::Feature;

use crate::style::RenderStyle;
use crate::surface::{LayerHandle, MapSurface, RenderState};

/// Draws features onto a [`MapSurface`].
///
/// Every call removes all previously tracked layers before drawing fresh
/// ones, so stale or duplicate layers can never accumulate when features
/// or settings change. Feature counts are visualization-scale, so the
/// full redraw is cheap; do not replace it with incremental diffing
/// without revisiting the single-writer discipline on the surface.
#[derive(Debug, Clone, Default)]
pub struct LayerRenderer {
    pub style: RenderStyle,
}

impl LayerRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Replace the surface's layers with one layer per feature.
    pub fn render(
        &self,
        surface: &mut dyn MapSurface,
        state: RenderState,
        features: &[Feature],
    ) -> RenderState {
        for handle in &state.active_layers {
            surface.remove_shape(handle.shape);
        }

        let mut active_layers = Vec::with_capacity(features.len());
        for feature in features {
            let shape = match feature {
                Feature::Polygon(poly) => surface.add_polygon(&poly.ring, &self.style.polygon),
                Feature::Point(point) => surface.add_marker(point.position, &self.style.marker),
            };
            active_layers.push(LayerHandle {
                shape,
                source_row_index: feature.source_row_index(),
            });
        }

        trace!(
            removed = state.active_layers.len(),
            drawn = active_layers.len(),
            "redrew map layers"
        );
        RenderState { active_layers }
    }
}
