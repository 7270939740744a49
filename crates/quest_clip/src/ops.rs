//! Boolean operations over polygon rings
//!
//! Built on `i_overlay` with even-odd filling. All input coordinates are
//! snapped to [`SNAP_RESOLUTION`] before clipping; the snap keeps output
//! vertices deterministic and merges near-coincident points that would
//! otherwise produce sliver contours.

use log::debug;

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use quest_math::{Polygon, Vec2};

use crate::error::{ClipError, Result};
use crate::set::{PolyShape, PolygonSet};

/// Coordinate grid the clipper snaps to (one thousandth of a world unit).
pub const SNAP_RESOLUTION: f64 = 0.001;

#[inline]
fn snap(v: f32) -> f64 {
    (v as f64 / SNAP_RESOLUTION).round() * SNAP_RESOLUTION
}

fn contour(ring: &Polygon) -> Vec<[f64; 2]> {
    ring.points().iter().map(|p| [snap(p.x), snap(p.y)]).collect()
}

fn set_contours(set: &PolygonSet) -> Vec<Vec<[f64; 2]>> {
    let mut contours = Vec::new();
    for shape in &set.shapes {
        contours.push(contour(&shape.boundary));
        for hole in &shape.holes {
            contours.push(contour(hole));
        }
    }
    contours
}

/// Convert raw overlay output back into a polygon set. Each output shape is
/// one outer contour followed by its holes. Contours collapsed below three
/// vertices by the snap are dropped.
fn collect_shapes(raw: Vec<Vec<Vec<[f64; 2]>>>) -> PolygonSet {
    let mut shapes = Vec::with_capacity(raw.len());
    for shape in raw {
        let mut rings = shape.into_iter().map(|contour| {
            Polygon::new(
                contour
                    .into_iter()
                    .map(|[x, y]| Vec2::new(x as f32, y as f32))
                    .collect(),
            )
        });
        let Some(boundary) = rings.next() else {
            continue;
        };
        if boundary.is_degenerate() {
            continue;
        }
        let holes = rings.filter(|ring| !ring.is_degenerate()).collect();
        shapes.push(PolyShape::new(boundary).with_holes(holes));
    }
    PolygonSet::new(shapes)
}

/// Union a list of rings into a polygon set.
///
/// The first ring is the subject and the rest are clips, combined with
/// even-odd filling, so overlapping source rings merge and fully-enclosed
/// opposite-winding rings survive as holes.
pub fn union(rings: &[Polygon]) -> Result<PolygonSet> {
    if rings.is_empty() {
        return Err(ClipError::EmptyUnion { sources: 0 });
    }
    for (index, ring) in rings.iter().enumerate() {
        if ring.is_degenerate() {
            return Err(ClipError::DegenerateSource {
                index,
                vertices: ring.len(),
            });
        }
    }

    let subj = vec![contour(&rings[0])];
    let clip: Vec<Vec<[f64; 2]>> = rings[1..].iter().map(contour).collect();

    let raw = subj.overlay(&clip, OverlayRule::Union, FillRule::EvenOdd);
    let set = collect_shapes(raw);
    debug!(
        "union: {} source ring(s) -> {} shape(s), area {:.3}",
        rings.len(),
        set.shapes.len(),
        set.area()
    );
    if set.is_empty() {
        return Err(ClipError::EmptyUnion {
            sources: rings.len(),
        });
    }
    Ok(set)
}

/// Subtract `cuts` from `set`. An empty result is a valid outcome (the cuts
/// may cover the whole set). Degenerate cut rings are skipped.
pub fn difference(set: &PolygonSet, cuts: &[Polygon]) -> PolygonSet {
    if set.is_empty() || cuts.is_empty() {
        return set.clone();
    }

    let subj = set_contours(set);
    let clip: Vec<Vec<[f64; 2]>> = cuts
        .iter()
        .filter(|ring| !ring.is_degenerate())
        .map(contour)
        .collect();
    if clip.is_empty() {
        return set.clone();
    }

    let raw = subj.overlay(&clip, OverlayRule::Difference, FillRule::EvenOdd);
    let result = collect_shapes(raw);
    debug!(
        "difference: {} cut(s), area {:.3} -> {:.3}",
        cuts.len(),
        set.area(),
        result.area()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f32, f32)]) -> Polygon {
        Polygon::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    fn unit_square(x: f32, y: f32, size: f32) -> Polygon {
        ring(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    #[test]
    fn test_union_single_ring() {
        let set = union(&[unit_square(0.0, 0.0, 10.0)]).unwrap();
        assert_eq!(set.shapes.len(), 1);
        assert!((set.area() - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_union_merges_overlap() {
        let set = union(&[unit_square(0.0, 0.0, 10.0), unit_square(5.0, 0.0, 10.0)]).unwrap();
        assert_eq!(set.shapes.len(), 1);
        assert!((set.area() - 150.0).abs() < 0.1);
    }

    #[test]
    fn test_union_keeps_disjoint_islands() {
        let set = union(&[unit_square(0.0, 0.0, 10.0), unit_square(20.0, 0.0, 10.0)]).unwrap();
        assert_eq!(set.shapes.len(), 2);
        assert!((set.area() - 200.0).abs() < 0.1);
    }

    #[test]
    fn test_union_idempotent() {
        let a = union(&[unit_square(0.0, 0.0, 10.0), unit_square(5.0, 5.0, 10.0)]).unwrap();
        let rings: Vec<Polygon> = a
            .shapes
            .iter()
            .map(|shape| shape.boundary.clone())
            .collect();
        let b = union(&rings).unwrap();
        assert!((a.area() - b.area()).abs() < 0.1);
    }

    #[test]
    fn test_difference_inverts_union() {
        // Disjoint A and B: union then subtract B recovers A's area
        let a = unit_square(0.0, 0.0, 10.0);
        let b = unit_square(30.0, 0.0, 10.0);
        let merged = union(&[a.clone(), b.clone()]).unwrap();
        let recovered = difference(&merged, &[b]);
        assert!((recovered.area() - a.signed_area()).abs() < 0.1);
        assert!(recovered.contains(Vec2::new(5.0, 5.0)));
        assert!(!recovered.contains(Vec2::new(35.0, 5.0)));
    }

    #[test]
    fn test_union_empty_input() {
        assert!(matches!(union(&[]), Err(ClipError::EmptyUnion { .. })));
    }

    #[test]
    fn test_union_degenerate_source() {
        let line = ring(&[(0.0, 0.0), (5.0, 0.0)]);
        assert!(matches!(
            union(&[line]),
            Err(ClipError::DegenerateSource { index: 0, .. })
        ));
    }

    #[test]
    fn test_difference_punches_hole() {
        let set = union(&[unit_square(0.0, 0.0, 10.0)]).unwrap();
        let cut = unit_square(4.0, 4.0, 2.0);
        let result = difference(&set, &[cut]);
        assert_eq!(result.shapes.len(), 1);
        assert_eq!(result.shapes[0].holes.len(), 1);
        assert!((result.area() - 96.0).abs() < 0.1);
        assert!(!result.contains(Vec2::new(5.0, 5.0)));
        assert!(result.contains(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_difference_can_split_shape() {
        let set = union(&[unit_square(0.0, 0.0, 10.0)]).unwrap();
        // Vertical slab cutting all the way through
        let cut = ring(&[(4.0, -1.0), (6.0, -1.0), (6.0, 11.0), (4.0, 11.0)]);
        let result = difference(&set, &[cut]);
        assert_eq!(result.shapes.len(), 2);
        assert!((result.area() - 80.0).abs() < 0.1);
    }

    #[test]
    fn test_difference_to_empty_is_ok() {
        let set = union(&[unit_square(0.0, 0.0, 10.0)]).unwrap();
        let cut = unit_square(-1.0, -1.0, 12.0);
        let result = difference(&set, &[cut]);
        assert!(result.is_empty());
        assert_eq!(result.area(), 0.0);
    }

    #[test]
    fn test_snap_merges_float_noise() {
        // Two rings separated by less than the snap grid still merge
        let set = union(&[
            unit_square(0.0, 0.0, 10.0),
            unit_square(10.0 + 0.0002, 0.0, 10.0),
        ])
        .unwrap();
        assert_eq!(set.shapes.len(), 1);
    }
}
