use glam::Vec2;

use crate::character::Character;
use crate::collision::{collision_info, CollisionSide};
use crate::entity::Movable;
use crate::geometry::{Aabb, HasAabb};

/// Velocity response after a sweep stopped short along `delta`.
pub fn respond_to_block<B: Movable + ?Sized>(body: &mut B, delta: Vec2) {
    let b = body.body_mut();
    if delta.x != 0.0 {
        b.velocity.x = 0.0;
    }
    if delta.y != 0.0 {
        b.velocity.y = 0.0;
        if delta.y > 0.0 {
            body.land();
        }
    }
}

/// Put the character's feet on `top`.
pub fn snap_onto(c: &mut Character, top: f32) {
    c.body.position.y = top - c.shape.half_height;
    c.body.velocity.y = 0.0;
    c.land();
}

/// Put the character's head (below the hair) against `bottom`.
pub fn snap_under(c: &mut Character, bottom: f32) {
    c.body.position.y = bottom + c.shape.half_height - c.shape.hair_height;
    c.body.velocity.y = 0.0;
}

/// Put the character's right side against `left`.
pub fn snap_left_of(c: &mut Character, left: f32) {
    c.body.position.x = left - c.shape.half_width;
    c.body.velocity.x = 0.0;
}

/// Put the character's left side against `right`.
pub fn snap_right_of(c: &mut Character, right: f32) {
    c.body.position.x = right + c.shape.half_width;
    c.body.velocity.x = 0.0;
}

/// Resolve a character overlapping a solid (a platform, usually) by side
/// classification, snapping it flush against the struck edge.
///
/// Only the velocity along the collision axis is cleared. Top and bottom
/// only resolve while the character moves into them, so a character at rest
/// on the ground is never pushed down by a platform. Left and right also
/// resolve at rest on that axis.
///
/// A character whose center ended up inside the solid (a platform slid into
/// it) is pushed out along the axis where its center is furthest from the
/// solid's center.
pub fn resolve_against_solid<S: HasAabb + ?Sized>(c: &mut Character, solid: &S) -> CollisionSide {
    let other = solid.aabb();
    let mine = c.aabb();
    let info = collision_info(&mine, &other);
    if !info.has_collision {
        return CollisionSide::None;
    }

    if other.contains(mine.center()) {
        return push_out(c, &mine, &other);
    }

    let v = c.body.velocity;
    match info.side {
        CollisionSide::Top if v.y > 0.0 => snap_onto(c, other.top()),
        CollisionSide::Bottom if v.y < 0.0 => snap_under(c, other.bottom()),
        CollisionSide::Left if v.x >= 0.0 => snap_left_of(c, other.left()),
        CollisionSide::Right if v.x <= 0.0 => snap_right_of(c, other.right()),
        _ => return CollisionSide::None,
    }
    info.side
}

/// Ties go to the vertical axis.
fn push_out(c: &mut Character, mine: &Aabb, other: &Aabb) -> CollisionSide {
    let offset = mine.center() - other.center();
    if offset.x.abs() > offset.y.abs() {
        if offset.x < 0.0 {
            snap_left_of(c, other.left());
            CollisionSide::Left
        } else {
            snap_right_of(c, other.right());
            CollisionSide::Right
        }
    } else if offset.y < 0.0 {
        snap_onto(c, other.top());
        CollisionSide::Top
    } else {
        snap_under(c, other.bottom());
        CollisionSide::Bottom
    }
}
