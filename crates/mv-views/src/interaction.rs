//! Maps UI events on drawn shapes back to result rows

use std::collections::HashMap;

use mv_core::ResultSet;
use mv_render::{LayerHandle, ShapeId};

use crate::payload::{dimensions_for_row, ClickPayload, HoverPayload};

pub type OnHover = Box<dyn FnMut(Option<HoverPayload>)>;
pub type OnClick = Box<dyn FnMut(ClickPayload)>;

/// Dispatches hover/click events for rendered layers.
///
/// The bridge only reads layer handles; it never mutates the surface.
/// Stale events (a shape whose row index no longer addresses a row)
/// degrade to null-valued payloads rather than failing.
pub struct InteractionBridge {
    on_hover: OnHover,
    on_click: OnClick,
    rows_by_shape: HashMap<ShapeId, usize>,
    hovered: Option<ShapeId>,
}

impl InteractionBridge {
    pub fn new(on_hover: OnHover, on_click: OnClick) -> Self {
        Self {
            on_hover,
            on_click,
            rows_by_shape: HashMap::new(),
            hovered: None,
        }
    }

    /// Register a rendered layer so its shape can be resolved on events.
    pub fn attach(&mut self, handle: &LayerHandle) {
        self.rows_by_shape
            .insert(handle.shape, handle.source_row_index);
    }

    /// Forget all registered layers, called before each redraw.
    pub fn detach_all(&mut self) {
        self.rows_by_shape.clear();
        self.hovered = None;
    }

    /// Deliver the shape currently under the pointer, or `None`.
    ///
    /// Fires `on_hover(Some(..))` on enter and `on_hover(None)` on leave;
    /// staying on the same shape does not re-fire.
    pub fn hover(&mut self, result_set: &ResultSet, shape: Option<ShapeId>) {
        let shape = shape.filter(|s| self.rows_by_shape.contains_key(s));
        if shape == self.hovered {
            return;
        }

        match shape {
            Some(id) => {
                let row_index = self.rows_by_shape[&id];
                (self.on_hover)(Some(HoverPayload {
                    dimensions: dimensions_for_row(result_set, row_index),
                    source: id,
                }));
            }
            None => (self.on_hover)(None),
        }
        self.hovered = shape;
    }

    /// Deliver a click on a shape, returning a copy of the payload for
    /// the caller's own use (e.g. opening a detail view).
    pub fn click(&mut self, result_set: &ResultSet, shape: ShapeId) -> Option<ClickPayload> {
        let row_index = *self.rows_by_shape.get(&shape)?;

        let pk_index = result_set.primary_key_index();
        let payload = ClickPayload {
            dimensions: dimensions_for_row(result_set, row_index),
            source: shape,
            primary_key_column: pk_index.map(|idx| result_set.columns[idx].clone()),
            primary_key_value: pk_index.and_then(|idx| {
                result_set
                    .row(row_index)
                    .and_then(|row| row.get(idx))
                    .cloned()
            }),
        };
        (self.on_click)(payload.clone());
        Some(payload)
    }
}
