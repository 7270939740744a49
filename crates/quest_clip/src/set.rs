//! Hole-aware polygon sets
//!
//! A [`PolygonSet`] is the output of a boolean operation: zero or more
//! disjoint shapes, each an outer boundary plus the holes punched into it.
//! Boundaries are normalized counterclockwise and holes clockwise, so
//! signed areas sum directly.

use quest_math::{Containment, Polygon, Vec2, Winding};

/// One connected region: an outer boundary and its holes.
#[derive(Clone, Debug, Default)]
pub struct PolyShape {
    pub boundary: Polygon,
    pub holes: Vec<Polygon>,
}

impl PolyShape {
    pub fn new(boundary: Polygon) -> Self {
        Self {
            boundary: boundary.with_winding(Winding::CounterClockwise),
            holes: Vec::new(),
        }
    }

    pub fn with_holes(mut self, holes: Vec<Polygon>) -> Self {
        self.holes = holes
            .into_iter()
            .map(|h| h.with_winding(Winding::Clockwise))
            .collect();
        self
    }

    /// Enclosed area: boundary area minus the holes.
    pub fn area(&self) -> f32 {
        let mut area = self.boundary.signed_area();
        for hole in &self.holes {
            // Holes are clockwise, so their signed area is already negative
            area += hole.signed_area();
        }
        area.max(0.0)
    }

    /// A point is inside the shape when it is inside the boundary and
    /// strictly inside no hole. Boundary contact (of either ring kind)
    /// counts as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        match self.boundary.contains(point) {
            Containment::Outside => return false,
            Containment::OnBoundary => return true,
            Containment::Inside => {}
        }
        for hole in &self.holes {
            if hole.contains(point) == Containment::Inside {
                return false;
            }
        }
        true
    }

    /// Nearest point on any ring of this shape.
    pub fn closest_boundary_point(&self, point: Vec2) -> Vec2 {
        let mut best = self.boundary.closest_boundary_point(point);
        let mut best_dist = point.distance_squared_to(best);
        for hole in &self.holes {
            let candidate = hole.closest_boundary_point(point);
            let dist = point.distance_squared_to(candidate);
            if dist < best_dist {
                best_dist = dist;
                best = candidate;
            }
        }
        best
    }
}

/// A collection of disjoint shapes produced by a clipping operation.
#[derive(Clone, Debug, Default)]
pub struct PolygonSet {
    pub shapes: Vec<PolyShape>,
}

impl PolygonSet {
    pub fn new(shapes: Vec<PolyShape>) -> Self {
        Self { shapes }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total enclosed area over all shapes.
    pub fn area(&self) -> f32 {
        self.shapes.iter().map(PolyShape::area).sum()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.shapes.iter().any(|shape| shape.contains(point))
    }

    /// The shape containing `point`, if any.
    pub fn shape_containing(&self, point: Vec2) -> Option<&PolyShape> {
        self.shapes.iter().find(|shape| shape.contains(point))
    }

    /// Nearest point on any ring of any shape. `None` when the set is empty.
    pub fn closest_boundary_point(&self, point: Vec2) -> Option<Vec2> {
        let mut best: Option<Vec2> = None;
        let mut best_dist = f32::MAX;
        for shape in &self.shapes {
            let candidate = shape.closest_boundary_point(point);
            let dist = point.distance_squared_to(candidate);
            if dist < best_dist {
                best_dist = dist;
                best = Some(candidate);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f32, f32)]) -> Polygon {
        Polygon::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    fn square_with_hole() -> PolyShape {
        PolyShape::new(ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]))
            .with_holes(vec![ring(&[
                (4.0, 4.0),
                (6.0, 4.0),
                (6.0, 6.0),
                (4.0, 6.0),
            ])])
    }

    #[test]
    fn test_winding_normalized() {
        // Both rings handed in counterclockwise; the hole must flip
        let shape = square_with_hole();
        assert_eq!(shape.boundary.winding(), Winding::CounterClockwise);
        assert_eq!(shape.holes[0].winding(), Winding::Clockwise);
    }

    #[test]
    fn test_area_subtracts_holes() {
        let shape = square_with_hole();
        assert!((shape.area() - 96.0).abs() < 1e-3);
    }

    #[test]
    fn test_contains_respects_holes() {
        let shape = square_with_hole();
        assert!(shape.contains(Vec2::new(2.0, 2.0)));
        assert!(!shape.contains(Vec2::new(5.0, 5.0)));
        // Hole edge still counts as inside the shape
        assert!(shape.contains(Vec2::new(4.0, 5.0)));
    }

    #[test]
    fn test_closest_boundary_point_considers_holes() {
        let shape = square_with_hole();
        let closest = shape.closest_boundary_point(Vec2::new(5.0, 5.0));
        // Hole wall is 1 unit away, outer wall 5 units
        assert!((5.0 - closest.x).abs() <= 1.0 + 1e-4);
        assert!(closest.distance_to(Vec2::new(5.0, 5.0)) < 1.5);
    }

    #[test]
    fn test_empty_set() {
        let set = PolygonSet::default();
        assert!(set.is_empty());
        assert_eq!(set.area(), 0.0);
        assert!(!set.contains(Vec2::ZERO));
        assert!(set.closest_boundary_point(Vec2::ZERO).is_none());
    }
}
