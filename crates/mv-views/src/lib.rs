//! View layer composing the map visualization pipeline
//!
//! Wires extraction, bounds, rendering, and interaction into an egui map
//! view, and defines the hover/click payloads delivered to the caller.

pub mod interaction;
pub mod map_view;
pub mod modal;
pub mod payload;

pub use interaction::InteractionBridge;
pub use map_view::{MapCallbacks, MapView};
pub use modal::DetailModal;
pub use payload::{ClickPayload, Dimension, HoverPayload};
