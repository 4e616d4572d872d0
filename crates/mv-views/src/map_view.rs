//! The map view: extraction, bounds, rendering and interaction in one
//! egui component

use std::sync::Arc;

use egui::{Color32, Rounding, Sense, Ui};
use serde_json::Value;
use tracing::debug;

use mv_core::{
    bin_sizes, compute_bounds, compute_range, extract, Bounds, Extraction, MapSettings,
    MetricRange, ResultSet, WORLD_BOUNDS,
};
use mv_render::{EguiMapSurface, LayerRenderer, RenderState, RenderStyle, Viewport};

use crate::interaction::InteractionBridge;
use crate::modal::DetailModal;
use crate::payload::{ClickPayload, HoverPayload};

const MAP_BACKGROUND: Color32 = Color32::from_rgb(230, 240, 250);

/// Caller callbacks consumed by the surrounding visualization chrome.
pub struct MapCallbacks {
    pub on_hover: Box<dyn FnMut(Option<HoverPayload>)>,
    pub on_click: Box<dyn FnMut(ClickPayload)>,
    pub on_update_warnings: Box<dyn FnMut(Vec<String>)>,
}

impl Default for MapCallbacks {
    fn default() -> Self {
        Self {
            on_hover: Box::new(|_| {}),
            on_click: Box::new(|_| {}),
            on_update_warnings: Box::new(|_| {}),
        }
    }
}

/// Interactive map over a result set.
///
/// The result set and settings are supplied fresh on every `ui` call;
/// features, bounds and layers are recomputed only when the result set
/// is replaced (pointer identity) or a geometry-affecting setting
/// changes by value. Layers are torn down and redrawn wholesale on each
/// recompute.
pub struct MapView {
    renderer: LayerRenderer,
    surface: EguiMapSurface,
    render_state: RenderState,
    bridge: InteractionBridge,
    modal: DetailModal,

    extraction: Extraction,
    bounds: Bounds,
    range: MetricRange,

    on_update_warnings: Box<dyn FnMut(Vec<String>)>,
    last_data: Option<Arc<ResultSet>>,
    last_settings: Option<MapSettings>,
}

impl MapView {
    pub fn new(style: RenderStyle, callbacks: MapCallbacks) -> Self {
        Self {
            renderer: LayerRenderer::new(style),
            surface: EguiMapSurface::new(),
            render_state: RenderState::default(),
            bridge: InteractionBridge::new(callbacks.on_hover, callbacks.on_click),
            modal: DetailModal::new(),
            extraction: Extraction::default(),
            bounds: WORLD_BOUNDS,
            range: MetricRange::default(),
            on_update_warnings: callbacks.on_update_warnings,
            last_data: None,
            last_settings: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn metric_range(&self) -> MetricRange {
        self.range
    }

    pub fn warnings(&self) -> &[String] {
        &self.extraction.warnings
    }

    /// Draw the map into the available space and dispatch interactions.
    pub fn ui(&mut self, ui: &mut Ui, data: &Arc<ResultSet>, settings: &MapSettings) {
        self.refresh_if_changed(data, settings);

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, MAP_BACKGROUND);

        let viewport = Viewport::new(rect, self.bounds);
        self.surface.paint(&painter, &viewport);

        let hovered = response
            .hover_pos()
            .and_then(|pos| self.surface.hit_test(pos, &viewport));
        self.bridge.hover(data, hovered);

        if response.clicked() {
            let clicked = response
                .interact_pointer_pos()
                .and_then(|pos| self.surface.hit_test(pos, &viewport));
            if let Some(shape) = clicked {
                if let Some(payload) = self.bridge.click(data, shape) {
                    self.modal.open(payload.dimensions);
                }
            }
        }

        self.modal.show(ui.ctx());
    }

    /// Serializable view configuration, currently the render style.
    pub fn save_config(&self) -> Value {
        serde_json::to_value(&self.renderer.style).unwrap_or(Value::Null)
    }

    pub fn load_config(&mut self, config: Value) {
        if let Ok(style) = serde_json::from_value::<RenderStyle>(config) {
            self.renderer.style = style;
            // Force a redraw with the new style on the next ui call.
            self.last_data = None;
        }
    }

    fn refresh_if_changed(&mut self, data: &Arc<ResultSet>, settings: &MapSettings) {
        let data_unchanged = self
            .last_data
            .as_ref()
            .is_some_and(|prev| Arc::ptr_eq(prev, data));
        let settings_unchanged = self
            .last_settings
            .as_ref()
            .is_some_and(|prev| prev.same_geometry_inputs(settings));
        if data_unchanged && settings_unchanged {
            return;
        }

        self.extraction = extract(data, settings);
        self.bounds = compute_bounds(&self.extraction.features);
        self.bounds.pad_for_bins(&bin_sizes(data, settings));
        self.range = compute_range(&self.extraction.features);

        let state = std::mem::take(&mut self.render_state);
        self.render_state = self
            .renderer
            .render(&mut self.surface, state, &self.extraction.features);

        self.bridge.detach_all();
        for handle in &self.render_state.active_layers {
            self.bridge.attach(handle);
        }

        debug!(
            features = self.extraction.features.len(),
            warnings = self.extraction.warnings.len(),
            "recomputed map geometry"
        );
        (self.on_update_warnings)(self.extraction.warnings.clone());

        self.last_data = Some(Arc::clone(data));
        self.last_settings = Some(settings.clone());
    }
}
