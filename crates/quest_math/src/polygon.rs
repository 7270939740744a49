//! Polygon ring operations
//!
//! A polygon is an ordered ring of vertices; the last point connects back to
//! the first implicitly. Winding direction is meaningful to callers (outer
//! boundaries and holes use opposite windings), so it is preserved by every
//! operation here except the explicit `reverse`.

use alloc::vec::Vec;

use crate::consts::BOUNDARY_EPSILON;
use crate::intersect::nearest_point_on_segment;
use crate::rect::Rect;
use crate::vector::Vec2;

/// Result of a point-in-polygon query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Outside,
    OnBoundary,
    Inside,
}

impl Containment {
    /// Inside or on the boundary.
    #[inline]
    pub fn is_inside(self) -> bool {
        self != Self::Outside
    }
}

/// Vertex traversal direction of a ring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    /// Positive signed area
    CounterClockwise,
    /// Negative (or zero) signed area
    Clockwise,
}

/// Closed polygon ring
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn from_slice(points: &[Vec2]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A ring needs at least 3 points to enclose area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Iterate the ring's edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Twice-signed-area accumulator; positive for counterclockwise rings.
    pub fn signed_area(&self) -> f32 {
        let mut area = 0.0;
        for (a, b) in self.edges() {
            area += a.cross(b);
        }
        area * 0.5
    }

    pub fn winding(&self) -> Winding {
        if self.signed_area() > 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }

    /// Normalize to the given winding, reversing if needed.
    pub fn with_winding(self, winding: Winding) -> Self {
        if self.winding() == winding || self.is_degenerate() {
            self
        } else {
            self.reversed()
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(&self.points)
    }

    /// Min and max Y over the ring's vertices. `(0, 0)` for an empty ring.
    pub fn y_extent(&self) -> (f32, f32) {
        if self.points.is_empty() {
            return (0.0, 0.0);
        }
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for p in &self.points {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        (min_y, max_y)
    }

    pub fn translate(&mut self, offset: Vec2) {
        for p in &mut self.points {
            *p += offset;
        }
    }

    /// Ray-crossing containment test with explicit boundary classification.
    ///
    /// The result is independent of winding direction. Degenerate rings
    /// contain nothing.
    pub fn contains(&self, point: Vec2) -> Containment {
        if self.is_degenerate() {
            return Containment::Outside;
        }

        // Boundary check first, so callers snapping onto edges can tell the
        // difference from strictly-inside.
        for (a, b) in self.edges() {
            if a == b {
                continue;
            }
            let nearest = nearest_point_on_segment(a, b, point);
            if point.distance_squared_to(nearest) <= BOUNDARY_EPSILON * BOUNDARY_EPSILON {
                return Containment::OnBoundary;
            }
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let t = (point.y - a.y) / (b.y - a.y);
                let x = a.x + t * (b.x - a.x);
                if point.x < x {
                    inside = !inside;
                }
            }
        }

        if inside {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }

    /// Minimum distance from `point` to any edge of the ring.
    /// Zero-length edges are skipped; a ring with fewer than 2 points
    /// reports zero distance.
    pub fn distance_to_boundary(&self, point: Vec2) -> f32 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let mut best = f32::MAX;
        for (a, b) in self.edges() {
            if a == b {
                continue;
            }
            let nearest = nearest_point_on_segment(a, b, point);
            best = best.min(point.distance_squared_to(nearest));
        }
        if best == f32::MAX {
            0.0
        } else {
            best.sqrt()
        }
    }

    /// Nearest point on the ring's boundary to `point`.
    pub fn closest_boundary_point(&self, point: Vec2) -> Vec2 {
        let mut best_dist = f32::MAX;
        let mut best = match self.points.first() {
            Some(&p) => p,
            None => return point,
        };
        for (a, b) in self.edges() {
            if a == b {
                continue;
            }
            let nearest = nearest_point_on_segment(a, b, point);
            let dist = point.distance_squared_to(nearest);
            if dist < best_dist {
                best_dist = dist;
                best = nearest;
            }
        }
        best
    }

    /// Corner classification relative to the ring's traversal direction.
    pub fn is_vertex_concave(&self, index: usize) -> bool {
        let n = self.points.len();
        let current = self.points[index];
        let next = self.points[(index + 1) % n];
        let previous = self.points[if index == 0 { n - 1 } else { index - 1 }];

        (current - previous).perpendicular_cw().dot(next - current) <= 0.0
    }

    /// Offset each vertex along its averaged edge normals.
    ///
    /// For a counterclockwise ring a positive `amount` moves vertices inward
    /// (shrinking the ring); clockwise rings grow by the same amount. The
    /// navigation code relies on that asymmetry: boundaries shrink while
    /// holes expand under one call.
    pub fn inflate(&self, amount: f32) -> Polygon {
        let n = self.points.len();
        let mut result = Vec::with_capacity(n);
        for i in 0..n {
            let prev = self.points[if i == 0 { n - 1 } else { i - 1 }];
            let curr = self.points[i];
            let next = self.points[(i + 1) % n];

            let prev_dir = (prev - curr).normalize();
            let next_dir = (next - curr).normalize();
            let avg_dir = prev_dir + next_dir;
            let sign = if self.is_vertex_concave(i) {
                amount
            } else {
                -amount
            };
            result.push(curr + avg_dir * sign);
        }
        Polygon::new(result)
    }
}
