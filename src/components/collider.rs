//! Axis-aligned bounding box collider component.
//!
//! Entities carrying a [`Collider`] participate in the per-tick pairwise
//! collision pass. The overlap test uses strict inequalities, so boxes that
//! merely touch at an edge do not collide. Collision checking can be toggled
//! at runtime through the `active` flag without removing the component.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// AABB collider relative to the entity's [`Position`](super::position::Position).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    /// Box size in world units.
    pub size: Vec2,
    /// Offset of the box's lower corner from the entity position.
    pub offset: Vec2,
    /// Whether this collider takes part in the collision pass this tick.
    pub active: bool,
}

impl Collider {
    /// Create an active collider with the given size and no offset.
    pub fn new(width: f32, height: f32) -> Self {
        Collider {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
            active: true,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Returns `(min, max)` of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// AABB vs AABB overlap test against another collider at a different
    /// entity position. Edge contact counts as no overlap.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        let (min, max) = self.aabb(position);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_min_max() {
        let collider = Collider::new(10.0, 20.0);
        let (min, max) = collider.aabb(Vec2::new(5.0, 5.0));
        assert_eq!(min, Vec2::new(5.0, 5.0));
        assert_eq!(max, Vec2::new(15.0, 25.0));
    }

    #[test]
    fn test_aabb_negative_size_normalizes() {
        let collider = Collider {
            size: Vec2::new(-10.0, -10.0),
            offset: Vec2::ZERO,
            active: true,
        };
        let (min, max) = collider.aabb(Vec2::new(0.0, 0.0));
        assert_eq!(min, Vec2::new(-10.0, -10.0));
        assert_eq!(max, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_overlapping_boxes() {
        let a = Collider::new(10.0, 10.0);
        let b = Collider::new(10.0, 10.0);
        assert!(a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(5.0, 5.0)));
        assert!(b.overlaps(Vec2::new(5.0, 5.0), &a, Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_separated_boxes() {
        let a = Collider::new(10.0, 10.0);
        let b = Collider::new(10.0, 10.0);
        assert!(!a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Collider::new(10.0, 10.0);
        let b = Collider::new(10.0, 10.0);
        // b starts exactly where a ends on the x axis
        assert!(!a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(10.0, 0.0)));
        // and on the y axis
        assert!(!a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn test_offset_applies() {
        let a = Collider::new(10.0, 10.0).with_offset(Vec2::new(100.0, 0.0));
        let b = Collider::new(10.0, 10.0);
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(5.0, 0.0)));
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(105.0, 0.0)));
    }

    #[test]
    fn test_contains_point() {
        let collider = Collider::new(10.0, 10.0);
        assert!(collider.contains_point(Vec2::ZERO, Vec2::new(5.0, 5.0)));
        // containment is inclusive at the border, unlike overlap
        assert!(collider.contains_point(Vec2::ZERO, Vec2::new(10.0, 10.0)));
        assert!(!collider.contains_point(Vec2::ZERO, Vec2::new(10.1, 5.0)));
    }
}
