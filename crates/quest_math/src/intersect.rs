//! Segment projection and intersection tests

use crate::vector::Vec2;

/// Project `p` onto the segment `[a, b]`, clamped to the segment ends.
/// A zero-length segment returns `a`.
pub fn nearest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= 0.0 {
        return a;
    }
    let r = (p - a).dot(ab) / len_sq;
    if r <= 0.0 {
        a
    } else if r >= 1.0 {
        b
    } else {
        a + ab * r
    }
}

/// Check whether two segments properly cross. Segments that merely touch at
/// an endpoint or share a point do NOT count as intersecting.
pub fn segments_intersect(start1: Vec2, end1: Vec2, start2: Vec2, end2: Vec2) -> bool {
    segment_intersection(start1, end1, start2, end2).is_some()
}

/// Find the crossing point of two segments, if they properly cross.
/// Touching endpoints and collinear overlap return `None`.
pub fn segment_intersection(start1: Vec2, end1: Vec2, start2: Vec2, end2: Vec2) -> Option<Vec2> {
    let d1 = end1 - start1;
    let d2 = end2 - start2;
    let s1_minus_s2 = start1 - start2;

    let denom = d1.cross(d2);
    if denom == 0.0 {
        // Parallel (or degenerate)
        return None;
    }
    let denom = 1.0 / denom;

    let r = (s1_minus_s2.y * d2.x - s1_minus_s2.x * d2.y) * denom;
    let s = (s1_minus_s2.y * d1.x - s1_minus_s2.x * d1.y) * denom;

    // Lines that touch but don't cross do not intersect
    if r <= 0.0 || r >= 1.0 || s <= 0.0 || s >= 1.0 {
        return None;
    }

    Some(start1 + d1 * r)
}
