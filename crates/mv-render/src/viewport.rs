//! Screen-space projection of geographic bounds

use egui::{Pos2, Rect};

use mv_core::{Bounds, LatLng};

/// A screen rectangle fitted to geographic bounds, with equirectangular
/// projection both ways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub rect: Rect,
    pub bounds: Bounds,
}

impl Viewport {
    pub fn new(rect: Rect, bounds: Bounds) -> Self {
        Self { rect, bounds }
    }

    fn spans(&self) -> (f64, f64) {
        // Guard against a degenerate box (single feature) producing NaNs.
        let lat_span = (self.bounds.north_east.lat - self.bounds.south_west.lat).max(1e-9);
        let lng_span = (self.bounds.north_east.lng - self.bounds.south_west.lng).max(1e-9);
        (lat_span, lng_span)
    }

    /// Geographic position to screen position.
    pub fn project(&self, point: LatLng) -> Pos2 {
        let (lat_span, lng_span) = self.spans();
        let x = (point.lng - self.bounds.south_west.lng) / lng_span;
        let y = (self.bounds.north_east.lat - point.lat) / lat_span;
        Pos2::new(
            self.rect.left() + x as f32 * self.rect.width(),
            self.rect.top() + y as f32 * self.rect.height(),
        )
    }

    /// Screen position back to geographic position.
    pub fn unproject(&self, pos: Pos2) -> LatLng {
        let (lat_span, lng_span) = self.spans();
        let x = ((pos.x - self.rect.left()) / self.rect.width()) as f64;
        let y = ((pos.y - self.rect.top()) / self.rect.height()) as f64;
        LatLng::new(
            self.bounds.north_east.lat - y * lat_span,
            self.bounds.south_west.lng + x * lng_span,
        )
    }
}
