use glam::Vec2;

use crate::geometry::{Aabb, HasAabb};
use crate::tiles::TileGrid;

/// Side of the *other* body that was hit. `Top` means the mover came down
/// onto it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CollisionSide {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
}

impl CollisionSide {
    /// Unit vector pointing away from the struck surface.
    pub fn normal(self) -> Vec2 {
        match self {
            CollisionSide::None => Vec2::ZERO,
            CollisionSide::Top => Vec2::NEG_Y,
            CollisionSide::Bottom => Vec2::Y,
            CollisionSide::Left => Vec2::NEG_X,
            CollisionSide::Right => Vec2::X,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CollisionInfo {
    pub has_collision: bool,
    pub side: CollisionSide,
    pub normal: Vec2,
    pub penetration_depth: f32,
}

impl CollisionInfo {
    pub const NONE: CollisionInfo = CollisionInfo {
        has_collision: false,
        side: CollisionSide::None,
        normal: Vec2::ZERO,
        penetration_depth: 0.0,
    };
}

#[inline]
pub fn overlaps(a: &impl HasAabb, b: &impl HasAabb) -> bool {
    a.aabb().intersects(&b.aabb())
}

/// Classify the contact between `mover` and `other` by the smallest of the
/// four directed overlaps.
///
/// Minimum-penetration guess; near corners, where two overlaps are almost
/// equal, it can pick the wrong side. Ties resolve in the order Top, Bottom,
/// Left, Right.
pub fn collision_info(mover: &Aabb, other: &Aabb) -> CollisionInfo {
    if !mover.intersects(other) {
        return CollisionInfo::NONE;
    }

    let left = mover.right() - other.left();
    let right = other.right() - mover.left();
    let top = mover.bottom() - other.top();
    let bottom = other.bottom() - mover.top();

    let min = left.min(right).min(top.min(bottom));
    let side = if min == top {
        CollisionSide::Top
    } else if min == bottom {
        CollisionSide::Bottom
    } else if min == left {
        CollisionSide::Left
    } else {
        CollisionSide::Right
    };

    CollisionInfo {
        has_collision: true,
        side,
        normal: side.normal(),
        penetration_depth: min,
    }
}

/// Something a moving box can be tested against.
pub trait Obstacle {
    fn blocks(&self, area: &Aabb) -> bool;
}

impl Obstacle for TileGrid {
    fn blocks(&self, area: &Aabb) -> bool {
        self.overlaps_solid(area)
    }
}

impl Obstacle for Aabb {
    fn blocks(&self, area: &Aabb) -> bool {
        self.intersects(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_boxes_have_no_collision() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(20.0, 0.0, 10.0, 10.0);
        assert_eq!(collision_info(&a, &b), CollisionInfo::NONE);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn landing_is_top() {
        let mover = Aabb::new(5.0, -8.0, 10.0, 10.0);
        let floor = Aabb::new(0.0, 0.0, 40.0, 10.0);
        let info = collision_info(&mover, &floor);
        assert!(info.has_collision);
        assert_eq!(info.side, CollisionSide::Top);
        assert_eq!(info.normal, Vec2::new(0.0, -1.0));
        assert_eq!(info.penetration_depth, 2.0);
    }

    #[test]
    fn each_side_by_smallest_overlap() {
        let wall = Aabb::new(0.0, 0.0, 20.0, 40.0);
        let hit_from_left = Aabb::new(-9.0, 10.0, 10.0, 10.0);
        let hit_from_right = Aabb::new(19.0, 10.0, 10.0, 10.0);
        let hit_from_below = Aabb::new(5.0, 39.0, 10.0, 10.0);

        let l = collision_info(&hit_from_left, &wall);
        assert_eq!(l.side, CollisionSide::Left);
        assert_eq!(l.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(l.penetration_depth, 1.0);

        let r = collision_info(&hit_from_right, &wall);
        assert_eq!(r.side, CollisionSide::Right);
        assert_eq!(r.normal, Vec2::new(1.0, 0.0));

        let b = collision_info(&hit_from_below, &wall);
        assert_eq!(b.side, CollisionSide::Bottom);
        assert_eq!(b.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn exact_corner_tie_prefers_top() {
        // equal 1-unit overlap on the top and left overlaps
        let mover = Aabb::new(-9.0, -9.0, 10.0, 10.0);
        let other = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(collision_info(&mover, &other).side, CollisionSide::Top);

        // and bottom beats right
        let mover = Aabb::new(9.0, 9.0, 10.0, 10.0);
        assert_eq!(collision_info(&mover, &other).side, CollisionSide::Bottom);
    }
}
