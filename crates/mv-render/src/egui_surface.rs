//! Egui-backed map surface with retained shapes and pointer hit-testing

use egui::{Painter, Pos2, Shape, Stroke};
use geo::Contains;
use geo_types::{Coord, LineString, Point as GeoPoint, Polygon as GeoPolygon};

use mv_core::LatLng;

use crate::style::{MarkerStyle, PolygonStyle};
use crate::surface::{MapSurface, ShapeId};
use crate::viewport::Viewport;

/// Extra pointer slop around markers, in pixels.
const MARKER_HIT_SLOP: f32 = 2.0;

enum SurfaceShape {
    Polygon { ring: Vec<LatLng>, style: PolygonStyle },
    Marker { at: LatLng, style: MarkerStyle },
}

/// A retained-shape surface painted through egui.
///
/// Shapes are stored in insertion order; painting and hit-testing treat
/// later shapes as topmost.
#[derive(Default)]
pub struct EguiMapSurface {
    next_id: u64,
    shapes: Vec<(ShapeId, SurfaceShape)>,
}

impl EguiMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn allocate_id(&mut self) -> ShapeId {
        self.next_id += 1;
        ShapeId(self.next_id)
    }

    /// Paint all shapes into the viewport's rect.
    pub fn paint(&self, painter: &Painter, viewport: &Viewport) {
        for (_, shape) in &self.shapes {
            match shape {
                SurfaceShape::Polygon { ring, style } => {
                    let points: Vec<Pos2> =
                        ring.iter().map(|p| viewport.project(*p)).collect();
                    if points.len() > 2 {
                        let stroke = Stroke::new(style.stroke_width, style.stroke_color);
                        // convex_polygon mis-fills concave rings; those get
                        // a closed boundary stroke only.
                        if is_convex(&points) {
                            painter.add(Shape::convex_polygon(
                                points,
                                style.effective_fill(),
                                stroke,
                            ));
                        } else {
                            painter.add(Shape::closed_line(points, stroke));
                        }
                    }
                }
                SurfaceShape::Marker { at, style } => {
                    let pos = viewport.project(*at);
                    painter.circle_filled(pos, style.radius, style.fill_color);
                    painter.circle_stroke(
                        pos,
                        style.radius,
                        Stroke::new(style.outline_width, style.outline_color),
                    );
                }
            }
        }
    }

    /// Topmost shape under the pointer, if any.
    ///
    /// Markers are tested by screen distance, polygons by geographic
    /// containment of the unprojected pointer.
    pub fn hit_test(&self, pointer: Pos2, viewport: &Viewport) -> Option<ShapeId> {
        let geo_pointer = viewport.unproject(pointer);
        for (id, shape) in self.shapes.iter().rev() {
            let hit = match shape {
                SurfaceShape::Polygon { ring, .. } => ring_contains(ring, geo_pointer),
                SurfaceShape::Marker { at, style } => {
                    let pos = viewport.project(*at);
                    (pos - pointer).length() <= style.radius + MARKER_HIT_SLOP
                }
            };
            if hit {
                return Some(*id);
            }
        }
        None
    }
}

/// Whether the closed polyline turns in a single direction.
///
/// Collinear runs are ignored; rings with fewer than four vertices are
/// trivially convex.
fn is_convex(points: &[Pos2]) -> bool {
    if points.len() < 4 {
        return true;
    }
    let n = points.len();
    let mut sign = 0.0f32;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross;
        } else if sign * cross < 0.0 {
            return false;
        }
    }
    true
}

fn ring_contains(ring: &[LatLng], point: LatLng) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let exterior: LineString = ring
        .iter()
        .map(|p| Coord { x: p.lng, y: p.lat })
        .collect::<Vec<_>>()
        .into();
    let polygon = GeoPolygon::new(exterior, vec![]);
    polygon.contains(&GeoPoint::new(point.lng, point.lat))
}

impl MapSurface for EguiMapSurface {
    fn add_polygon(&mut self, ring: &[LatLng], style: &PolygonStyle) -> ShapeId {
        let id = self.allocate_id();
        self.shapes.push((
            id,
            SurfaceShape::Polygon {
                ring: ring.to_vec(),
                style: style.clone(),
            },
        ));
        id
    }

    fn add_marker(&mut self, at: LatLng, style: &MarkerStyle) -> ShapeId {
        let id = self.allocate_id();
        self.shapes.push((
            id,
            SurfaceShape::Marker {
                at,
                style: style.clone(),
            },
        ));
        id
    }

    fn remove_shape(&mut self, id: ShapeId) {
        self.shapes.retain(|(shape_id, _)| *shape_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Rect, Vec2};
    use mv_core::Bounds;

    fn viewport() -> Viewport {
        Viewport::new(
            Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0)),
            Bounds {
                south_west: LatLng::new(0.0, 0.0),
                north_east: LatLng::new(10.0, 10.0),
            },
        )
    }

    fn square(min: f64, max: f64) -> Vec<LatLng> {
        vec![
            LatLng::new(min, min),
            LatLng::new(min, max),
            LatLng::new(max, max),
            LatLng::new(max, min),
        ]
    }

    #[test]
    fn hit_test_finds_a_polygon_under_the_pointer() {
        let mut surface = EguiMapSurface::new();
        let vp = viewport();
        let id = surface.add_polygon(&square(2.0, 8.0), &PolygonStyle::default());

        let inside = vp.project(LatLng::new(5.0, 5.0));
        let outside = vp.project(LatLng::new(9.5, 9.5));

        assert_eq!(surface.hit_test(inside, &vp), Some(id));
        assert_eq!(surface.hit_test(outside, &vp), None);
    }

    #[test]
    fn hit_test_prefers_the_topmost_shape() {
        let mut surface = EguiMapSurface::new();
        let vp = viewport();
        let _bottom = surface.add_polygon(&square(1.0, 9.0), &PolygonStyle::default());
        let top = surface.add_polygon(&square(4.0, 6.0), &PolygonStyle::default());

        let pointer = vp.project(LatLng::new(5.0, 5.0));
        assert_eq!(surface.hit_test(pointer, &vp), Some(top));
    }

    #[test]
    fn markers_are_hit_by_screen_distance() {
        let mut surface = EguiMapSurface::new();
        let vp = viewport();
        let style = MarkerStyle::default();
        let id = surface.add_marker(LatLng::new(5.0, 5.0), &style);

        let center = vp.project(LatLng::new(5.0, 5.0));
        let near = center + Vec2::new(style.radius, 0.0);
        let far = center + Vec2::new(style.radius * 4.0, 0.0);

        assert_eq!(surface.hit_test(near, &vp), Some(id));
        assert_eq!(surface.hit_test(far, &vp), None);
    }

    #[test]
    fn convexity_distinguishes_squares_from_l_shapes() {
        let square = [
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(0.0, 10.0),
        ];
        assert!(is_convex(&square));

        // An L-shaped parcel: the reflex corner at (5, 5) makes it concave.
        let l_shape = [
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 5.0),
            Pos2::new(5.0, 5.0),
            Pos2::new(5.0, 10.0),
            Pos2::new(0.0, 10.0),
        ];
        assert!(!is_convex(&l_shape));
    }

    #[test]
    fn collinear_vertices_stay_convex() {
        let square_with_midpoints = [
            Pos2::new(0.0, 0.0),
            Pos2::new(5.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(0.0, 10.0),
        ];
        assert!(is_convex(&square_with_midpoints));
    }

    #[test]
    fn concave_rings_still_hit_test_correctly() {
        let mut surface = EguiMapSurface::new();
        let vp = viewport();
        let l_shape = vec![
            LatLng::new(1.0, 1.0),
            LatLng::new(1.0, 9.0),
            LatLng::new(5.0, 9.0),
            LatLng::new(5.0, 5.0),
            LatLng::new(9.0, 5.0),
            LatLng::new(9.0, 1.0),
        ];
        let id = surface.add_polygon(&l_shape, &PolygonStyle::default());

        // Inside the lower arm of the L.
        let inside = vp.project(LatLng::new(2.0, 5.0));
        // In the notch the reflex corner carves out.
        let notch = vp.project(LatLng::new(7.0, 7.0));

        assert_eq!(surface.hit_test(inside, &vp), Some(id));
        assert_eq!(surface.hit_test(notch, &vp), None);
    }

    #[test]
    fn removed_shapes_stop_hitting() {
        let mut surface = EguiMapSurface::new();
        let vp = viewport();
        let id = surface.add_polygon(&square(2.0, 8.0), &PolygonStyle::default());
        surface.remove_shape(id);

        assert_eq!(surface.shape_count(), 0);
        let pointer = vp.project(LatLng::new(5.0, 5.0));
        assert_eq!(surface.hit_test(pointer, &vp), None);
    }
}
