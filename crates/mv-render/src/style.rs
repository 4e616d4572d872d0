//! Layer styling configuration
//!
//! Styles are explicit configuration passed into the renderer; nothing is
//! computed from the data in this layer.

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Styling for every layer kind a renderer can draw.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderStyle {
    pub polygon: PolygonStyle,
    pub marker: MarkerStyle,
}

/// Fixed style for polygon layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub fill_color: Color32,
    /// Fill alpha in `0.0..=1.0`, applied on top of `fill_color`.
    pub fill_opacity: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color32::from_rgb(0, 255, 255),
            stroke_width: 1.5,
            fill_color: Color32::from_rgb(0, 255, 255),
            fill_opacity: 0.2,
        }
    }
}

impl PolygonStyle {
    /// Fill color with the configured opacity baked in.
    pub fn effective_fill(&self) -> Color32 {
        let alpha = (self.fill_opacity.clamp(0.0, 1.0) * 255.0) as u8;
        Color32::from_rgba_unmultiplied(
            self.fill_color.r(),
            self.fill_color.g(),
            self.fill_color.b(),
            alpha,
        )
    }
}

/// Fixed style for point markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: f32,
    pub fill_color: Color32,
    pub outline_color: Color32,
    pub outline_width: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fill_color: Color32::from_rgb(255, 100, 100),
            outline_color: Color32::WHITE,
            outline_width: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_fill_applies_opacity() {
        let style = PolygonStyle::default();
        // Color32 stores premultiplied alpha, so compare whole colors
        // built through the same constructor rather than raw channels.
        assert_eq!(
            style.effective_fill(),
            Color32::from_rgba_unmultiplied(0, 255, 255, 51)
        );
    }

    #[test]
    fn full_opacity_keeps_the_fill_color() {
        let style = PolygonStyle {
            fill_opacity: 1.0,
            ..PolygonStyle::default()
        };
        assert_eq!(
            style.effective_fill(),
            Color32::from_rgba_unmultiplied(0, 255, 255, 255)
        );
    }
}
