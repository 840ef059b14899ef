//! Geometry kernel: distances, interpolation, circle vs convex polygon
//!
//! Polygons are given as vertex lists whose edges are read as directed lines
//! in winding order (last vertex to first closes the loop).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Outcome of an overlap test against a line or polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intersection {
    /// Fully on the interior side
    Inside,
    /// Fully on the exterior side
    Outside,
    /// Straddles the boundary
    Intersect,
}

/// A contact footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Point at parameter `k` along a→b (`k` is not clamped)
#[inline]
pub fn lerp(a: Vec2, b: Vec2, k: f32) -> Vec2 {
    a + (b - a) * k
}

/// Signed perpendicular offset of a point from the directed line a→b
///
/// Positive on the exterior side of a polygon edge, negative on the interior.
#[inline]
pub fn signed_offset(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    ((b.x - a.x) * (a.y - p.y) - (b.y - a.y) * (a.x - p.x)) / distance(a, b)
}

/// Classify a circle against the directed line a→b
///
/// Touching the line from either side counts as `Intersect`.
pub fn circle_vs_directed_line(circle: Circle, a: Vec2, b: Vec2) -> Intersection {
    let d = signed_offset(circle.center, a, b);
    if d > circle.radius {
        Intersection::Outside
    } else if d >= -circle.radius {
        Intersection::Intersect
    } else {
        Intersection::Inside
    }
}

/// Classify a circle against a convex polygon
///
/// Short-circuits on the first edge the circle lies entirely outside of.
pub fn circle_vs_convex_polygon(circle: Circle, polygon: &[Vec2]) -> Intersection {
    let Some(&last) = polygon.last() else {
        return Intersection::Outside;
    };
    let mut intersect = false;
    let mut a = last;
    for &b in polygon {
        match circle_vs_directed_line(circle, a, b) {
            Intersection::Outside => return Intersection::Outside,
            Intersection::Intersect => intersect = true,
            Intersection::Inside => {}
        }
        a = b;
    }
    if intersect {
        Intersection::Intersect
    } else {
        Intersection::Inside
    }
}

/// Cross-section of a bead: an octagon centered on the origin
///
/// The flat left/right sides are `extra` tall; the top and bottom faces are as
/// wide as the rod hole.
pub fn bead_octagon(bead_width: f32, bead_height: f32, bead_hole: f32, bead_extra: f32) -> [Vec2; 8] {
    let w = bead_width / 2.0;
    let h = bead_height / 2.0;
    let t = bead_hole / 2.0;
    let b = bead_extra / 2.0;
    [
        Vec2::new(w, -b),
        Vec2::new(w, b),
        Vec2::new(t, h),
        Vec2::new(-t, h),
        Vec2::new(-w, b),
        Vec2::new(-w, -b),
        Vec2::new(-t, -h),
        Vec2::new(t, -h),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octagon() -> [Vec2; 8] {
        bead_octagon(72.0, 48.0, 16.0, 2.0)
    }

    #[test]
    fn test_distance_and_lerp() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(lerp(a, b, 0.5), Vec2::new(1.5, 2.0));
        // Extrapolation beyond the segment
        assert_eq!(lerp(a, b, 2.0), Vec2::new(6.0, 8.0));
        assert_eq!(lerp(a, b, -1.0), Vec2::new(-3.0, -4.0));
    }

    #[test]
    fn test_directed_line_sign_flips_with_winding() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Circle::new(Vec2::new(5.0, -20.0), 5.0);
        let forward = circle_vs_directed_line(c, a, b);
        let backward = circle_vs_directed_line(c, b, a);
        assert_eq!(forward, Intersection::Outside);
        assert_eq!(backward, Intersection::Inside);
    }

    #[test]
    fn test_directed_line_intersect_band() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Circle::new(Vec2::new(5.0, 3.0), 5.0);
        assert_eq!(circle_vs_directed_line(c, a, b), Intersection::Intersect);
    }

    #[test]
    fn test_directed_line_boundaries() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        // Offset exactly -radius touches the line from the inside
        let c = Circle::new(Vec2::new(5.0, 5.0), 5.0);
        assert_eq!(circle_vs_directed_line(c, a, b), Intersection::Intersect);
        let c = Circle::new(Vec2::new(5.0, 6.0), 5.0);
        assert_eq!(circle_vs_directed_line(c, a, b), Intersection::Inside);
        // Offset exactly +radius is not yet outside
        let c = Circle::new(Vec2::new(5.0, -5.0), 5.0);
        assert_eq!(circle_vs_directed_line(c, a, b), Intersection::Intersect);
        // A point on the line
        let c = Circle::new(Vec2::new(5.0, 0.0), 0.0);
        assert_eq!(circle_vs_directed_line(c, a, b), Intersection::Intersect);
    }

    #[test]
    fn test_polygon_center_inside() {
        let c = Circle::new(Vec2::ZERO, 0.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Inside);
        let c = Circle::new(Vec2::ZERO, 5.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Inside);
    }

    #[test]
    fn test_polygon_far_outside() {
        let c = Circle::new(Vec2::new(100.0, 0.0), 5.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Outside);
        let c = Circle::new(Vec2::new(0.0, -30.0), 5.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Outside);
    }

    #[test]
    fn test_polygon_edge_touch() {
        // Just outside the right side, within the contact radius
        let c = Circle::new(Vec2::new(38.0, 0.0), 5.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Intersect);
        // Same spot as a point contact misses
        let c = Circle::new(Vec2::new(38.0, 0.0), 0.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Outside);
    }

    #[test]
    fn test_polygon_slanted_edge_touch() {
        // About 2px beyond the lower-right slanted face
        let c = Circle::new(Vec2::new(26.0, 12.0), 5.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Intersect);
        let c = Circle::new(Vec2::new(26.0, 12.0), 0.0);
        assert_eq!(circle_vs_convex_polygon(c, &octagon()), Intersection::Outside);
    }

    #[test]
    fn test_empty_polygon() {
        let c = Circle::new(Vec2::ZERO, 1.0);
        assert_eq!(circle_vs_convex_polygon(c, &[]), Intersection::Outside);
    }
}
