//! Axis-aligned rectangle

use crate::vector::Vec2;

/// Axis-aligned bounding rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// An empty (inverted) rect
    pub const EMPTY: Self = Self {
        min: Vec2::new(f32::MAX, f32::MAX),
        max: Vec2::new(f32::MIN, f32::MIN),
    };

    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create from a set of points
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut rect = Self::EMPTY;
        for &point in points {
            rect = rect.expand_to_include(point);
        }
        rect
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Check if the rect is valid (min <= max)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Expand to include a point
    pub fn expand_to_include(self, point: Vec2) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Expand by a uniform amount in all directions
    #[inline]
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let rect = Rect::from_points(&[
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, -1.0),
        ]);
        assert_eq!(rect.min, Vec2::new(-2.0, -1.0));
        assert_eq!(rect.max, Vec2::new(4.0, 5.0));
        assert!(rect.is_valid());
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(rect.contains_point(Vec2::new(5.0, 5.0)));
        assert!(rect.contains_point(Vec2::new(0.0, 10.0)));
        assert!(!rect.contains_point(Vec2::new(11.0, 5.0)));
    }

    #[test]
    fn test_empty_invalid() {
        assert!(!Rect::EMPTY.is_valid());
    }
}
