//! Pathfinder over the navigable polygon set
//!
//! Owns the current navigable boundary polygons plus a dynamic set of
//! obstacle polygons keyed by an opaque identity, and answers the queries
//! the movement layer needs: point legality, closest-legal-point correction
//! and waypoint paths that bend around holes.
//!
//! The clipped navigable set is re-derived on demand rather than cached;
//! obstacle toggles are frequent and queries are room-scale.

use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace};

use quest_clip::{difference, union, PolyShape, PolygonSet};
use quest_math::{nearest_point_on_segment, segments_intersect, Containment, Polygon, Vec2};

use crate::error::Result;

/// Inward offset applied before containment tests, countering the
/// coordinate-snapping error the clipper introduces at boundaries.
const INFLATE_AMOUNT: f32 = 0.01;

/// Offset for path-graph nodes, pushed off their corner so line-of-sight
/// segments do not graze the ring they came from.
const NODE_OFFSET: f32 = 0.05;

/// Identity key for a registered obstacle, assigned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u64);

#[derive(Clone, Debug)]
struct Obstacle {
    ring: Polygon,
    enabled: bool,
}

/// How a [`Pathfinder::closest_legal_point`] result was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegalOutcome {
    /// The target was already legal and is returned unchanged.
    TargetLegal,
    /// The target was illegal and was projected onto the area boundary.
    Snapped,
    /// The starting point was outside every navigable polygon; the target
    /// is returned unchanged as a best-effort fallback.
    FromOutside,
    /// There is no navigable area at all; the target is returned unchanged.
    NoArea,
}

/// A corrected position plus how it was derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegalPoint {
    pub point: Vec2,
    pub outcome: LegalOutcome,
}

/// Navigable-area owner and query service for one room.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    mains: Vec<Polygon>,
    obstacles: HashMap<ObstacleId, Obstacle>,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the navigable boundary with a single ring.
    pub fn set_main_polygon(&mut self, boundary: Polygon) {
        self.set_main_polygons(vec![boundary]);
    }

    /// Replace the navigable boundary rings. Disjoint islands are all kept
    /// and remain individually navigable.
    pub fn set_main_polygons(&mut self, boundaries: Vec<Polygon>) {
        debug!("pathfinder main polygons replaced ({} ring(s))", boundaries.len());
        self.mains = boundaries
            .into_iter()
            .filter(|ring| !ring.is_degenerate())
            .collect();
    }

    /// Drop the boundary and all obstacles.
    pub fn clear(&mut self) {
        self.mains.clear();
        self.obstacles.clear();
    }

    pub fn has_area(&self) -> bool {
        !self.mains.is_empty()
    }

    /// Register (or replace) an obstacle hole under an identity key.
    pub fn add_obstacle(&mut self, id: ObstacleId, ring: Polygon) {
        if ring.is_degenerate() {
            trace!("ignoring degenerate obstacle {:?}", id);
            return;
        }
        self.obstacles.insert(
            id,
            Obstacle {
                ring,
                enabled: true,
            },
        );
    }

    /// Unregister an obstacle. Returns whether it existed.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> bool {
        self.obstacles.remove(&id).is_some()
    }

    /// Toggle an obstacle without unregistering it. Returns whether it
    /// existed.
    pub fn set_obstacle_enabled(&mut self, id: ObstacleId, enabled: bool) -> bool {
        match self.obstacles.get_mut(&id) {
            Some(obstacle) => {
                obstacle.enabled = enabled;
                true
            }
            None => false,
        }
    }

    fn enabled_obstacles(&self) -> impl Iterator<Item = &Polygon> {
        self.obstacles
            .values()
            .filter(|o| o.enabled)
            .map(|o| &o.ring)
    }

    /// Fast membership test against the raw rings: inside at least one
    /// boundary and strictly inside no enabled obstacle.
    pub fn is_point_in_area(&self, point: Vec2) -> bool {
        if !self.mains.iter().any(|ring| ring.contains(point).is_inside()) {
            return false;
        }
        !self
            .enabled_obstacles()
            .any(|ring| ring.contains(point) == Containment::Inside)
    }

    /// Clip the boundary rings against the enabled obstacles, producing the
    /// authoritative hole-aware navigable set.
    fn derive_set(&self) -> Result<PolygonSet> {
        let merged = union(&self.mains)?;
        let cuts: Vec<Polygon> = self.enabled_obstacles().cloned().collect();
        Ok(difference(&merged, &cuts))
    }

    /// Correct a desired target position against the navigable area.
    ///
    /// `from` is presumed legal; the shape containing it is located, inset
    /// by a small epsilon, and if `to` falls outside that inset shape it is
    /// projected onto the boundary. The projection picks the edge adjacent
    /// to the nearest vertex with the smaller turning angle toward the
    /// target, which avoids snapping to the wrong side of sharp corners.
    pub fn closest_legal_point(&self, from: Vec2, to: Vec2) -> LegalPoint {
        let set = match self.derive_set() {
            Ok(set) if !set.is_empty() => set,
            _ => {
                debug!("closest_legal_point: no navigable area");
                return LegalPoint {
                    point: to,
                    outcome: LegalOutcome::NoArea,
                };
            }
        };

        let Some(shape) = set.shape_containing(from) else {
            debug!("closest_legal_point: from {:?} outside all navigable polygons", from);
            return LegalPoint {
                point: to,
                outcome: LegalOutcome::FromOutside,
            };
        };

        // Inset the shape: the boundary shrinks, the holes grow.
        let boundary = shape.boundary.inflate(INFLATE_AMOUNT);
        let holes: Vec<Polygon> = shape
            .holes
            .iter()
            .map(|hole| hole.inflate(INFLATE_AMOUNT))
            .collect();

        let legal = boundary.contains(to).is_inside()
            && !holes.iter().any(|hole| hole.contains(to) == Containment::Inside);
        if legal {
            return LegalPoint {
                point: to,
                outcome: LegalOutcome::TargetLegal,
            };
        }

        let mut rings: Vec<&Polygon> = Vec::with_capacity(holes.len() + 1);
        rings.push(&boundary);
        rings.extend(holes.iter());
        LegalPoint {
            point: project_onto_rings(&rings, to),
            outcome: LegalOutcome::Snapped,
        }
    }

    /// Nearest navigable point to `point`: the point itself when legal,
    /// otherwise the closest spot on the area's boundary. `None` when no
    /// area exists.
    pub fn find_closest_point_to_area(&self, point: Vec2) -> Option<Vec2> {
        if self.is_point_in_area(point) {
            return Some(point);
        }
        let set = self.derive_set().ok()?;
        set.closest_boundary_point(point)
    }

    /// Find a waypoint path from `from` to `to` through the navigable set.
    ///
    /// Both endpoints are clamped into the area first. Returns `None` when
    /// there is no area or the endpoints sit on mutually unreachable
    /// islands.
    pub fn find_path(&self, from: Vec2, to: Vec2) -> Option<Vec<Vec2>> {
        let set = self.derive_set().ok()?;
        if set.is_empty() {
            return None;
        }

        let start = if set.contains(from) {
            from
        } else {
            set.closest_boundary_point(from)?
        };
        let goal = if set.contains(to) {
            to
        } else {
            set.closest_boundary_point(to)?
        };

        if line_of_sight(&set, start, goal) {
            return Some(vec![start, goal]);
        }

        let mut nodes = vec![start, goal];
        collect_corner_nodes(&set, &mut nodes);
        trace!("path graph: {} node(s)", nodes.len());

        let links = build_links(&set, &nodes);
        astar(&nodes, &links, 0, 1)
    }
}

/// Gather path-graph nodes: ring corners the walkable interior bends
/// around, pushed off the corner by [`NODE_OFFSET`].
fn collect_corner_nodes(set: &PolygonSet, nodes: &mut Vec<Vec2>) {
    let mut push_ring = |offset: &Polygon| {
        for index in 0..offset.len() {
            if !offset.is_vertex_concave(index) {
                let candidate = offset.points()[index];
                if set.contains(candidate) {
                    nodes.push(candidate);
                }
            }
        }
    };
    for shape in &set.shapes {
        push_ring(&shape.boundary.inflate(NODE_OFFSET));
        for hole in &shape.holes {
            push_ring(&hole.inflate(NODE_OFFSET));
        }
    }
}

fn shape_edges(shape: &PolyShape) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    shape
        .boundary
        .edges()
        .chain(shape.holes.iter().flat_map(|hole| hole.edges()))
}

/// A segment is traversable when it crosses no ring edge and its midpoint
/// is inside the set. Touching an edge without crossing it is allowed, so
/// endpoints sitting exactly on a boundary still connect.
fn line_of_sight(set: &PolygonSet, a: Vec2, b: Vec2) -> bool {
    if a == b {
        return true;
    }
    for shape in &set.shapes {
        for (e0, e1) in shape_edges(shape) {
            if segments_intersect(a, b, e0, e1) {
                return false;
            }
        }
    }
    set.contains(a.lerp(b, 0.5))
}

fn build_links(set: &PolygonSet, nodes: &[Vec2]) -> Vec<Vec<usize>> {
    let mut links = vec![Vec::new(); nodes.len()];
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if line_of_sight(set, nodes[i], nodes[j]) {
                links[i].push(j);
                links[j].push(i);
            }
        }
    }
    links
}

/// A* over the visibility graph.
fn astar(nodes: &[Vec2], links: &[Vec<usize>], start: usize, goal: usize) -> Option<Vec<Vec2>> {
    #[derive(Clone, Copy)]
    struct Candidate {
        index: usize,
        f_score: f32,
    }

    impl PartialEq for Candidate {
        fn eq(&self, other: &Self) -> bool {
            self.index == other.index
        }
    }
    impl Eq for Candidate {}
    impl PartialOrd for Candidate {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Candidate {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            other
                .f_score
                .partial_cmp(&self.f_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        }
    }

    let goal_point = nodes[goal];
    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<usize, usize> = HashMap::new();
    let mut g_score: HashMap<usize, f32> = HashMap::new();

    g_score.insert(start, 0.0);
    open.push(Candidate {
        index: start,
        f_score: nodes[start].distance_to(goal_point),
    });

    while let Some(current) = open.pop() {
        if current.index == goal {
            let mut path = vec![nodes[goal]];
            let mut cursor = goal;
            while let Some(&prev) = came_from.get(&cursor) {
                path.push(nodes[prev]);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }

        let current_g = *g_score.get(&current.index).unwrap_or(&f32::MAX);
        for &neighbor in &links[current.index] {
            let tentative = current_g + nodes[current.index].distance_to(nodes[neighbor]);
            if tentative < *g_score.get(&neighbor).unwrap_or(&f32::MAX) {
                came_from.insert(neighbor, current.index);
                g_score.insert(neighbor, tentative);
                open.push(Candidate {
                    index: neighbor,
                    f_score: tentative + nodes[neighbor].distance_to(goal_point),
                });
            }
        }
    }
    None
}

/// Project `target` onto the rings via the nearest-vertex heuristic: of the
/// two edges adjacent to the globally nearest vertex, project onto the one
/// turning less away from the target.
fn project_onto_rings(rings: &[&Polygon], target: Vec2) -> Vec2 {
    let mut best_dist = f32::MAX;
    let mut best: Option<(usize, usize)> = None;
    for (ring_index, ring) in rings.iter().enumerate() {
        for (vert_index, &vertex) in ring.points().iter().enumerate() {
            let dist = target.distance_squared_to(vertex);
            if dist < best_dist {
                best_dist = dist;
                best = Some((ring_index, vert_index));
            }
        }
    }
    let Some((ring_index, vert_index)) = best else {
        return target;
    };

    let points = rings[ring_index].points();
    let count = points.len();
    let current = points[vert_index];
    let previous = points[if vert_index == 0 { count - 1 } else { vert_index - 1 }];
    let next = points[(vert_index + 1) % count];

    let toward_target = (target - current).normalize();
    let along_prev = (previous - current).normalize();
    let along_next = (next - current).normalize();

    // Larger dot product = smaller turning angle
    if toward_target.dot(along_prev) >= toward_target.dot(along_next) {
        nearest_point_on_segment(previous, current, target)
    } else {
        nearest_point_on_segment(current, next, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, w: f32, h: f32) -> Polygon {
        Polygon::new(vec![
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ])
    }

    fn room_with_hole() -> Pathfinder {
        let mut nav = Pathfinder::new();
        nav.set_main_polygon(square(0.0, 0.0, 100.0, 100.0));
        nav.add_obstacle(ObstacleId(1), square(40.0, 40.0, 20.0, 20.0));
        nav
    }

    #[test]
    fn test_point_in_area() {
        let nav = room_with_hole();
        assert!(nav.is_point_in_area(Vec2::new(10.0, 10.0)));
        assert!(!nav.is_point_in_area(Vec2::new(50.0, 50.0)));
        assert!(!nav.is_point_in_area(Vec2::new(150.0, 50.0)));
    }

    #[test]
    fn test_obstacle_lifecycle() {
        let mut nav = room_with_hole();
        let inside_hole = Vec2::new(50.0, 50.0);

        assert!(nav.set_obstacle_enabled(ObstacleId(1), false));
        assert!(nav.is_point_in_area(inside_hole));

        assert!(nav.set_obstacle_enabled(ObstacleId(1), true));
        assert!(!nav.is_point_in_area(inside_hole));

        assert!(nav.remove_obstacle(ObstacleId(1)));
        assert!(nav.is_point_in_area(inside_hole));
        assert!(!nav.remove_obstacle(ObstacleId(1)));
        assert!(!nav.set_obstacle_enabled(ObstacleId(1), true));
    }

    #[test]
    fn test_legal_target_unchanged() {
        let nav = room_with_hole();
        let result = nav.closest_legal_point(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert_eq!(result.outcome, LegalOutcome::TargetLegal);
        assert_eq!(result.point, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_target_in_hole_snaps_to_hole_boundary() {
        let nav = room_with_hole();
        let result = nav.closest_legal_point(Vec2::new(10.0, 10.0), Vec2::new(50.0, 50.0));
        assert_eq!(result.outcome, LegalOutcome::Snapped);
        // Must land on (or just off) the hole's wall, not reach the target
        assert!(result.point.distance_to(Vec2::new(50.0, 50.0)) > 5.0);
        let on_hole_wall = (result.point.x - 40.0).abs() < 0.1
            || (result.point.x - 60.0).abs() < 0.1
            || (result.point.y - 40.0).abs() < 0.1
            || (result.point.y - 60.0).abs() < 0.1;
        assert!(on_hole_wall, "snapped to {:?}", result.point);
    }

    #[test]
    fn test_target_outside_boundary_snaps() {
        let nav = room_with_hole();
        let result = nav.closest_legal_point(Vec2::new(10.0, 10.0), Vec2::new(10.0, 150.0));
        assert_eq!(result.outcome, LegalOutcome::Snapped);
        assert!((result.point.y - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_from_outside_falls_back_to_target() {
        let nav = room_with_hole();
        let to = Vec2::new(20.0, 20.0);
        let result = nav.closest_legal_point(Vec2::new(-50.0, -50.0), to);
        assert_eq!(result.outcome, LegalOutcome::FromOutside);
        assert_eq!(result.point, to);
    }

    #[test]
    fn test_no_area() {
        let nav = Pathfinder::new();
        let to = Vec2::new(5.0, 5.0);
        let result = nav.closest_legal_point(Vec2::ZERO, to);
        assert_eq!(result.outcome, LegalOutcome::NoArea);
        assert_eq!(result.point, to);
    }

    #[test]
    fn test_closest_point_to_area() {
        let nav = room_with_hole();
        let inside = Vec2::new(10.0, 10.0);
        assert_eq!(nav.find_closest_point_to_area(inside), Some(inside));

        let snapped = nav.find_closest_point_to_area(Vec2::new(50.0, 120.0)).unwrap();
        assert!(snapped.distance_to(Vec2::new(50.0, 100.0)) < 0.1);

        assert_eq!(Pathfinder::new().find_closest_point_to_area(inside), None);
    }

    #[test]
    fn test_direct_path() {
        let nav = room_with_hole();
        let path = nav
            .find_path(Vec2::new(10.0, 10.0), Vec2::new(30.0, 10.0))
            .unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_path_bends_around_hole() {
        let mut nav = Pathfinder::new();
        nav.set_main_polygon(square(0.0, 0.0, 100.0, 100.0));
        // Tall slab leaving corridors above and below
        nav.add_obstacle(ObstacleId(7), square(40.0, 10.0, 20.0, 80.0));

        let from = Vec2::new(10.0, 50.0);
        let to = Vec2::new(90.0, 50.0);
        let path = nav.find_path(from, to).unwrap();
        assert!(path.len() > 2, "expected bends, got {:?}", path);
        assert_eq!(path[0], from);
        assert_eq!(*path.last().unwrap(), to);

        let length: f32 = path.windows(2).map(|w| w[0].distance_to(w[1])).sum();
        assert!(length > from.distance_to(to));
    }

    #[test]
    fn test_no_path_between_islands() {
        let mut nav = Pathfinder::new();
        nav.set_main_polygons(vec![
            square(0.0, 0.0, 10.0, 10.0),
            square(50.0, 0.0, 10.0, 10.0),
        ]);
        assert!(nav
            .find_path(Vec2::new(5.0, 5.0), Vec2::new(55.0, 5.0))
            .is_none());
    }

    #[test]
    fn test_both_islands_navigable() {
        let mut nav = Pathfinder::new();
        nav.set_main_polygons(vec![
            square(0.0, 0.0, 10.0, 10.0),
            square(50.0, 0.0, 10.0, 10.0),
        ]);
        assert!(nav.is_point_in_area(Vec2::new(5.0, 5.0)));
        assert!(nav.is_point_in_area(Vec2::new(55.0, 5.0)));
        let result = nav.closest_legal_point(Vec2::new(55.0, 5.0), Vec2::new(58.0, 5.0));
        assert_eq!(result.outcome, LegalOutcome::TargetLegal);
    }
}
