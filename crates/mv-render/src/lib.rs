//! Rendering layer for the map visualization pipeline
//!
//! Provides the map surface capability trait, the layer renderer with its
//! full-teardown redraw discipline, and an egui-backed surface with
//! lat/lng projection and pointer hit-testing.

pub mod egui_surface;
pub mod renderer;
pub mod style;
pub mod surface;
pub mod viewport;

pub use egui_surface::EguiMapSurface;
pub use renderer::LayerRenderer;
pub use style::{MarkerStyle, PolygonStyle, RenderStyle};
pub use surface::{LayerHandle, MapSurface, RenderState, ShapeId};
pub use viewport::Viewport;
